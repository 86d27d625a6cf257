use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::access::{Accessor, Node};

/// Structural information about a node, synthesized while it is visited.
///
/// None of this is stored on the caller's nodes. `siblings` and `children` borrow from the tree being
/// walked; `parent` is a snapshot of the parent's content (its fields minus its children).
///
/// # Fields
///
/// * `depth` - 0 for every root, one more per level below.
/// * `index` - the position path, e.g. `"0-2-1"`; a root's index is its position among the roots.
/// * `route` - route key values from the root down to this node, `Null` where the field is missing.
/// * `siblings` - every node sharing this node's parent, this node included. For a root, the roots.
/// * `children` - this node's own children.
/// * `degree` - the number of children.
/// * `parent` - the parent's content, `None` for a root.
/// * `is_leaf` - `true` when there are no children.
/// * `order` - the visitation sequence number, only set by traversal-driven operations.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure<'a> {
    pub depth:    usize,
    pub index:    String,
    pub route:    Vec<Value>,
    pub siblings: Rc<[&'a Node]>,
    pub children: Rc<[&'a Node]>,
    pub degree:   usize,
    pub parent:   Option<Rc<Node>>,
    pub is_leaf:  bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order:    Option<usize>,
}

/// Structure of a root at `position` among `roots`.
pub(crate) fn root_structure<'a>(
    node: &'a Node,
    access: &Accessor<'_>,
    position: usize,
    roots: Rc<[&'a Node]>,
) -> Structure<'a> {
    let children = access.children(node);
    Structure {
        depth: 0,
        index: position.to_string(),
        route: vec![access.route(node)],
        siblings: roots,
        degree: children.len(),
        is_leaf: children.is_empty(),
        children,
        parent: None,
        order: None,
    }
}

/// Structure of the `child_index`-th child of the node described by `parent`.
///
/// `parent_content` is the parent's content snapshot, shared between all of its children.
///
/// # Panics
///
/// If `child_index` is not a valid position in `parent.children`.
pub(crate) fn child_structure<'a>(
    parent: &Structure<'a>,
    parent_content: &Rc<Node>,
    access: &Accessor<'_>,
    child_index: usize,
) -> Structure<'a> {
    let child = parent.children[child_index];
    let children = access.children(child);
    let mut route = Vec::with_capacity(parent.route.len() + 1);
    route.extend(parent.route.iter().cloned());
    route.push(access.route(child));
    Structure {
        depth: parent.depth + 1,
        index: format!("{}-{}", parent.index, child_index),
        route,
        siblings: Rc::clone(&parent.children),
        degree: children.len(),
        is_leaf: children.is_empty(),
        children,
        parent: Some(Rc::clone(parent_content)),
        order: None,
    }
}

/// Pair each root with its structure, in root order.
pub(crate) fn root_frames<'a>(roots: &'a [Node], access: &Accessor<'_>) -> Vec<Frame<'a>> {
    let shared: Rc<[&'a Node]> = roots.iter().collect();
    roots
        .iter()
        .enumerate()
        .map(|(position, node)| Frame {
            node,
            structure: root_structure(node, access, position, Rc::clone(&shared)),
        })
        .collect()
}

/// Pair each child of `parent` with its structure, in child order.
pub(crate) fn child_frames<'a>(
    parent: &Structure<'a>,
    parent_content: &Rc<Node>,
    access: &Accessor<'_>,
) -> Vec<Frame<'a>> {
    parent
        .children
        .iter()
        .copied()
        .enumerate()
        .map(|(child_index, node)| Frame {
            node,
            structure: child_structure(parent, parent_content, access, child_index),
        })
        .collect()
}

/// A node of the caller's tree together with its synthesized structure.
#[derive(Clone, Debug)]
pub(crate) struct Frame<'a> {
    pub(crate) node:      &'a Node,
    pub(crate) structure: Structure<'a>,
}
