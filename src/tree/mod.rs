use std::convert::Infallible;
use std::rc::Rc;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::access::{get_path, Accessor, Node};
use crate::data::TreeData;
use crate::error::Error;
use crate::options::{OptionParams, Options, TraversalType};
use crate::prelude::Result;
use crate::structure::{child_frames, root_frames, Frame, Structure};
use crate::traverse::{try_traverse, Traversal};

mod print;
mod route;

/// The field [`MultiTree::structural_data`] stores each node's structure under.
pub const STRUCTURE_KEY: &str = "structure";

/// The field [`MultiTree::to_array`] stores the parent's relation value under.
pub const PARENT_KEY: &str = "parent";

/// Every node of a tree and the parent-child links between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodesAndRelations {
    pub nodes:     Vec<Node>,
    pub relations: Vec<Relation>,
}

/// A link from a parent to one of its children, identified by their relation key values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Relation {
    pub parent: Value,
    pub child:  Value,
}

/// A tree or forest bound to a configuration.
///
/// The bound data is never modified: every operation reads it and builds fresh nodes for its
/// results. Callbacks receive a node's content (the node without its children field), its
/// [`Structure`], and the bound data.
///
/// # Example
///
/// ```rust
/// # use multitree::prelude::*;
/// # use serde_json::json;
///
/// # fn main() -> Result<()> {
/// let tree = MultiTree::from_value(
///     json!({ "id": "root", "children": [{ "id": "a" }, { "id": "b" }] }),
///     &OptionParams::new(),
/// )?;
/// let leaves = tree.pick(|_, structure, _| structure.is_leaf, &OptionParams::new());
/// assert_eq!(leaves.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MultiTree {
    data:    Option<TreeData>,
    options: Options,
}

impl MultiTree {
    /// Create a new tree.
    ///
    /// # Arguments
    ///
    /// * `data` - The tree or forest to bind. `None` stands for null data: every operation then
    ///   returns its empty result.
    /// * `params` - The configuration, merged with the defaults through [`Options::resolve`].
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    ///
    /// let tree = MultiTree::new(None, &OptionParams::new().children_key("child"));
    /// assert_eq!(tree.options().target_children_key, "child");
    /// assert!(tree.data().is_none());
    /// ```
    pub fn new(data: impl Into<Option<TreeData>>, params: &OptionParams) -> Self {
        Self {
            data:    data.into(),
            options: Options::resolve(params),
        }
    }

    /// Create a tree from a JSON value, see [`TreeData::from_value`].
    pub fn from_value(value: Value, params: &OptionParams) -> Result<Self> {
        Ok(Self::new(TreeData::from_value(value)?, params))
    }

    /// Create a tree from JSON or JSON-with-comments text, see [`TreeData::from_jsonc`].
    pub fn from_jsonc(text: &str, params: &OptionParams) -> Result<Self> {
        Ok(Self::new(TreeData::from_jsonc(text)?, params))
    }

    pub fn data(&self) -> Option<&TreeData> {
        self.data.as_ref()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Iterate over the nodes in the given order.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": 1, "children": [{ "id": 2, "children": [{ "id": 3 }] }] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let depths: Vec<usize> = tree
    ///     .iter(TraversalType::Dfs, &OptionParams::new())
    ///     .map(|visit| visit.structure.depth)
    ///     .collect();
    /// assert_eq!(depths, vec![0, 1, 2]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self, traversal: TraversalType, params: &OptionParams) -> Traversal<'_> {
        Traversal::new(self.data.as_ref(), self.options.overlay(params), traversal)
    }

    /// Visit every node once, in depth-first pre-order or breadth-first level order.
    ///
    /// # Arguments
    ///
    /// * `visitor` - Called with the node's content, its structure (with `order` set) and the bound data.
    /// * `traversal` - The visiting order.
    /// * `params` - Overrides applied on top of the bound configuration for this call only.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": "r", "children": [{ "id": "a", "children": [{ "id": "c" }] }, { "id": "b" }] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let mut indexes = vec![];
    /// tree.for_each(
    ///     |_, structure, _| indexes.push(structure.index.clone()),
    ///     TraversalType::Bfs,
    ///     &OptionParams::new(),
    /// );
    /// assert_eq!(indexes, vec!["0", "0-0", "0-1", "0-0-0"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn for_each<'s, F>(&'s self, mut visitor: F, traversal: TraversalType, params: &OptionParams)
    where
        F: FnMut(Node, &Structure<'s>, &'s TreeData),
    {
        let visited = self.try_for_each(
            |content, structure, data| {
                visitor(content, structure, data);
                Ok::<(), Infallible>(())
            },
            traversal,
            params,
        );
        match visited {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Like [`MultiTree::for_each`], stopping at the first error the visitor returns.
    pub fn try_for_each<'s, F, E>(
        &'s self,
        visitor: F,
        traversal: TraversalType,
        params: &OptionParams,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(Node, &Structure<'s>, &'s TreeData) -> std::result::Result<(), E>,
    {
        let options = self.options.overlay(params);
        try_traverse(self.data.as_ref(), &options, traversal, visitor).map(|_| ())
    }

    /// Build a new tree by transforming every node.
    ///
    /// The transform sees a node before its children. Whenever the original node has children,
    /// their transformed versions are stored on the new node under the target children key. A forest
    /// maps to a forest, a single root to a single root, null data to `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": 1, "child": [{ "id": 2 }] }),
    ///     &OptionParams::new().children_key("child").target_children_key("nodes"),
    /// )?;
    /// let mapped = tree.map(
    ///     |mut content, structure, _| {
    ///         content.insert("depth".to_string(), json!(structure.depth));
    ///         content
    ///     },
    ///     &OptionParams::new(),
    /// );
    /// assert_eq!(
    ///     mapped.map(TreeData::into_value),
    ///     Some(json!({ "id": 1, "depth": 0, "nodes": [{ "id": 2, "depth": 1 }] }))
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn map<'s, F>(&'s self, mut transform: F, params: &OptionParams) -> Option<TreeData>
    where
        F: FnMut(Node, &Structure<'s>, &'s TreeData) -> Node,
    {
        let mapped = self.try_map(
            |content, structure, data| Ok::<Node, Infallible>(transform(content, structure, data)),
            params,
        );
        match mapped {
            Ok(tree) => tree,
            Err(never) => match never {},
        }
    }

    /// Like [`MultiTree::map`], stopping at the first error the transform returns.
    pub fn try_map<'s, F, E>(
        &'s self,
        mut transform: F,
        params: &OptionParams,
    ) -> std::result::Result<Option<TreeData>, E>
    where
        F: FnMut(Node, &Structure<'s>, &'s TreeData) -> std::result::Result<Node, E>,
    {
        let Some(data) = &self.data else {
            debug!("map over null data");
            return Ok(None);
        };
        let options = self.options.overlay(params);
        let access = Accessor::new(&options);
        let mut roots = Vec::with_capacity(data.roots().len());
        for frame in root_frames(data.roots(), &access) {
            roots.push(map_frame(frame, &access, data, &mut transform)?);
        }
        Ok(data.same_shape(roots))
    }

    /// Every node's content with its serialized [`Structure`] stored under [`STRUCTURE_KEY`].
    pub fn structural_data(&self, params: &OptionParams) -> Result<Option<TreeData>> {
        self.try_map(
            |mut content, structure, _| {
                content.insert(STRUCTURE_KEY.to_string(), serde_json::to_value(structure)?);
                Ok::<Node, Error>(content)
            },
            params,
        )
    }

    /// Keep the branches that contain at least one node matching the predicate.
    ///
    /// A node with a surviving child is kept, with only its surviving children, whether or not it
    /// matches itself. A node without surviving children is kept as a leaf (its children dropped)
    /// if it matches and removed otherwise. A forest keeps its surviving roots; a single root that
    /// does not survive yields `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": "r", "children": [
    ///         { "id": "a", "children": [{ "id": "c" }, { "id": "d" }] },
    ///         { "id": "b" }
    ///     ] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let filtered = tree.filter(|content, _, _| content["id"] == "c", &OptionParams::new());
    /// assert_eq!(
    ///     filtered.map(TreeData::into_value),
    ///     Some(json!({ "id": "r", "children": [{ "id": "a", "children": [{ "id": "c" }] }] }))
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter<'s, F>(&'s self, mut predicate: F, params: &OptionParams) -> Option<TreeData>
    where
        F: FnMut(&Node, &Structure<'s>, &'s TreeData) -> bool,
    {
        let filtered = self.try_filter(
            |content, structure, data| Ok::<bool, Infallible>(predicate(content, structure, data)),
            params,
        );
        match filtered {
            Ok(tree) => tree,
            Err(never) => match never {},
        }
    }

    /// Like [`MultiTree::filter`], stopping at the first error the predicate returns.
    pub fn try_filter<'s, F, E>(
        &'s self,
        mut predicate: F,
        params: &OptionParams,
    ) -> std::result::Result<Option<TreeData>, E>
    where
        F: FnMut(&Node, &Structure<'s>, &'s TreeData) -> std::result::Result<bool, E>,
    {
        let Some(data) = &self.data else {
            debug!("filter over null data");
            return Ok(None);
        };
        let options = self.options.overlay(params);
        let access = Accessor::new(&options);
        let mut roots = Vec::with_capacity(data.roots().len());
        for frame in root_frames(data.roots(), &access) {
            if let Some(kept) = filter_frame(frame, &access, data, &mut predicate)? {
                roots.push(kept);
            }
        }
        Ok(data.same_shape(roots))
    }

    /// The content of every node matching the predicate, in breadth-first order.
    pub fn pick<'s, F>(&'s self, mut predicate: F, params: &OptionParams) -> Vec<Node>
    where
        F: FnMut(&Node, &Structure<'s>, &'s TreeData) -> bool,
    {
        let mut picked = vec![];
        self.for_each(
            |content, structure, data| {
                if predicate(&content, structure, data) {
                    picked.push(content);
                }
            },
            TraversalType::Bfs,
            params,
        );
        picked
    }

    /// Fold every node into an accumulator, in the given order.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": "r", "children": [{ "id": "a", "children": [{ "id": "c" }] }, { "id": "b" }] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let joined = tree.reduce(
    ///     |total, content, _, _| format!("{}-{}", total, content["id"].as_str().unwrap_or("?")),
    ///     String::from("head"),
    ///     TraversalType::Bfs,
    ///     &OptionParams::new(),
    /// );
    /// assert_eq!(joined, "head-r-a-b-c");
    /// # Ok(())
    /// # }
    /// ```
    pub fn reduce<'s, T, F>(
        &'s self,
        mut reducer: F,
        initial: T,
        traversal: TraversalType,
        params: &OptionParams,
    ) -> T
    where
        F: FnMut(T, Node, &Structure<'s>, &'s TreeData) -> T,
    {
        let reduced = self.try_reduce(
            |total, content, structure, data| {
                Ok::<T, Infallible>(reducer(total, content, structure, data))
            },
            initial,
            traversal,
            params,
        );
        match reduced {
            Ok(total) => total,
            Err(never) => match never {},
        }
    }

    /// Like [`MultiTree::reduce`], stopping at the first error the reducer returns.
    pub fn try_reduce<'s, T, F, E>(
        &'s self,
        mut reducer: F,
        initial: T,
        traversal: TraversalType,
        params: &OptionParams,
    ) -> std::result::Result<T, E>
    where
        F: FnMut(T, Node, &Structure<'s>, &'s TreeData) -> std::result::Result<T, E>,
    {
        let Some(data) = &self.data else {
            return Ok(initial);
        };
        self.iter(traversal, params).try_fold(initial, |total, visit| {
            reducer(total, visit.content, &visit.structure, data)
        })
    }

    /// Flatten the tree into a list of contents, each with a [`PARENT_KEY`] field holding the
    /// parent's `relation_key` value (`null` for roots).
    ///
    /// `relation_key` may be a dotted path such as `"meta.id"`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": "r", "children": [{ "id": "a" }] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let flat: Vec<_> = tree
    ///     .to_array("id", TraversalType::Dfs)
    ///     .into_iter()
    ///     .map(serde_json::Value::Object)
    ///     .collect();
    /// assert_eq!(flat, vec![json!({ "id": "r", "parent": null }), json!({ "id": "a", "parent": "r" })]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_array(&self, relation_key: &str, traversal: TraversalType) -> Vec<Node> {
        let mut flat = vec![];
        self.for_each(
            |mut content, structure, _| {
                let parent = structure
                    .parent
                    .as_deref()
                    .map_or(Value::Null, |parent| get_path(parent, relation_key));
                content.insert(PARENT_KEY.to_string(), parent);
                flat.push(content);
            },
            traversal,
            &OptionParams::new(),
        );
        flat
    }

    /// Collect every node's content and a [`Relation`] for every parent-child link, walking
    /// depth-first.
    ///
    /// The relations of one node are emitted last child first.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": "r", "children": [{ "id": "a" }, { "id": "b" }] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let graph = tree.get_nodes_and_relations("id");
    /// assert_eq!(graph.nodes.len(), 3);
    /// assert_eq!(graph.relations[0], Relation { parent: json!("r"), child: json!("b") });
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_nodes_and_relations(&self, relation_key: &str) -> NodesAndRelations {
        let Some(data) = &self.data else {
            debug!("nodes and relations over null data");
            return NodesAndRelations::default();
        };
        let access = Accessor::new(&self.options);
        let mut graph = NodesAndRelations::default();
        let mut stack: Vec<&Node> = data.roots().iter().rev().collect();
        while let Some(node) = stack.pop() {
            graph.nodes.push(access.content(node));
            let parent = get_path(node, relation_key);
            for &child in access.children(node).iter().rev() {
                stack.push(child);
                graph.relations.push(Relation {
                    parent: parent.clone(),
                    child:  get_path(child, relation_key),
                });
            }
        }
        graph
    }
}

fn map_frame<'a, F, E>(
    frame: Frame<'a>,
    access: &Accessor<'_>,
    data: &'a TreeData,
    transform: &mut F,
) -> std::result::Result<Node, E>
where
    F: FnMut(Node, &Structure<'a>, &'a TreeData) -> std::result::Result<Node, E>,
{
    let content = access.content(frame.node);
    let parent = (!frame.structure.is_leaf).then(|| Rc::new(content.clone()));
    let mut target = transform(content, &frame.structure, data)?;
    if let Some(parent) = parent {
        let mut children = Vec::with_capacity(frame.structure.degree);
        for child in child_frames(&frame.structure, &parent, access) {
            children.push(map_frame(child, access, data, transform)?);
        }
        access.set_children(&mut target, children);
    }
    Ok(target)
}

fn filter_frame<'a, F, E>(
    frame: Frame<'a>,
    access: &Accessor<'_>,
    data: &'a TreeData,
    predicate: &mut F,
) -> std::result::Result<Option<Node>, E>
where
    F: FnMut(&Node, &Structure<'a>, &'a TreeData) -> std::result::Result<bool, E>,
{
    let content = access.content(frame.node);
    if !frame.structure.is_leaf {
        let parent = Rc::new(content.clone());
        let mut shortlisted = vec![];
        for child in child_frames(&frame.structure, &parent, access) {
            if let Some(kept) = filter_frame(child, access, data, predicate)? {
                shortlisted.push(kept);
            }
        }
        if !shortlisted.is_empty() {
            let mut kept = content;
            access.set_children(&mut kept, shortlisted);
            return Ok(Some(kept));
        }
    }
    if predicate(&content, &frame.structure, data)? {
        Ok(Some(content))
    } else {
        Ok(None)
    }
}
