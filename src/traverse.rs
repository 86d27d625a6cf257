//! Depth-first and breadth-first drivers.
//!
//! Both drivers visit every node exactly once and hand the visitor the node's content (a copy without
//! its children field), its [`Structure`] with `order` set, and the data being walked.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use log::{debug, trace};

use crate::access::{Accessor, Node};
use crate::data::TreeData;
use crate::frontier::Frontier;
use crate::options::{OptionParams, Options, TraversalType};
use crate::structure::{child_frames, root_frames, Frame, Structure};

/// Walk `data` depth-first in pre-order, left to right.
///
/// `None` data is walked as an empty forest: the visitor is never called.
///
/// ```rust
/// # use multitree::prelude::*;
/// # use serde_json::json;
/// # fn main() -> Result<()> {
/// let data = TreeData::from_value(json!({
///     "id": "R",
///     "children": [{ "id": "A", "children": [{ "id": "C" }, { "id": "D" }] }, { "id": "B" }]
/// }))?;
/// let mut visited = vec![];
/// dfs_traverse(data.as_ref(), |content, _, _| visited.push(content["id"].clone()), &OptionParams::new());
/// assert_eq!(visited, vec!["R", "A", "C", "D", "B"]);
/// # Ok(())
/// # }
/// ```
pub fn dfs_traverse<'a, F>(data: Option<&'a TreeData>, mut visitor: F, params: &OptionParams)
where
    F: FnMut(Node, &Structure<'a>, &'a TreeData),
{
    let options = Options::resolve(params);
    let _ = try_traverse(data, &options, TraversalType::Dfs, |content, structure, root| {
        visitor(content, structure, root);
        Ok::<(), Infallible>(())
    });
}

/// Walk `data` breadth-first in level order, left to right.
///
/// ```rust
/// # use multitree::prelude::*;
/// # use serde_json::json;
/// # fn main() -> Result<()> {
/// let data = TreeData::from_value(json!({
///     "id": "R",
///     "children": [{ "id": "A", "children": [{ "id": "C" }, { "id": "D" }] }, { "id": "B" }]
/// }))?;
/// let mut visited = vec![];
/// bfs_traverse(data.as_ref(), |content, _, _| visited.push(content["id"].clone()), &OptionParams::new());
/// assert_eq!(visited, vec!["R", "A", "B", "C", "D"]);
/// # Ok(())
/// # }
/// ```
pub fn bfs_traverse<'a, F>(data: Option<&'a TreeData>, mut visitor: F, params: &OptionParams)
where
    F: FnMut(Node, &Structure<'a>, &'a TreeData),
{
    let options = Options::resolve(params);
    let _ = try_traverse(data, &options, TraversalType::Bfs, |content, structure, root| {
        visitor(content, structure, root);
        Ok::<(), Infallible>(())
    });
}

/// Walk `data` in the given order with already resolved options.
///
/// Stops at the first `Err` returned by the visitor and hands it back unchanged; otherwise returns
/// the number of nodes visited.
pub(crate) fn try_traverse<'a, F, E>(
    data: Option<&'a TreeData>,
    options: &Options,
    traversal: TraversalType,
    mut visitor: F,
) -> Result<usize, E>
where
    F: FnMut(Node, &Structure<'a>, &'a TreeData) -> Result<(), E>,
{
    let Some(data) = data else {
        debug!("{} traversal over null data, nothing to visit", traversal);
        return Ok(0);
    };
    let mut visits = Traversal::new(Some(data), options.clone(), traversal);
    for visit in visits.by_ref() {
        visitor(visit.content, &visit.structure, data)?;
    }
    trace!("{} traversal visited {} node(s)", traversal, visits.visited());
    Ok(visits.visited())
}

/// One visited node: its content and its structure, `order` included.
#[derive(Clone, Debug)]
pub struct Visit<'a> {
    pub content:   Node,
    pub structure: Structure<'a>,
}

/// Iterator over the nodes of a tree or forest in depth-first or breadth-first order.
///
/// Structures are synthesized lazily, when a node's parent is taken from the frontier.
#[derive(Debug)]
pub struct Traversal<'a> {
    options:  Options,
    frontier: Pending<'a>,
    order:    usize,
}

#[derive(Debug)]
enum Pending<'a> {
    Stack(Vec<Frame<'a>>),
    Queue(VecDeque<Frame<'a>>),
}

impl<'a> Pending<'a> {
    fn new(traversal: TraversalType) -> Self {
        match traversal {
            TraversalType::Dfs => Pending::Stack(Vec::default()),
            TraversalType::Bfs => Pending::Queue(VecDeque::default()),
        }
    }

    fn push_group(&mut self, group: Vec<Frame<'a>>) {
        match self {
            Pending::Stack(stack) => stack.push_group(group),
            Pending::Queue(queue) => queue.push_group(group),
        }
    }

    fn take(&mut self) -> Option<Frame<'a>> {
        match self {
            Pending::Stack(stack) => stack.take(),
            Pending::Queue(queue) => queue.take(),
        }
    }
}

impl<'a> Traversal<'a> {
    pub fn new(data: Option<&'a TreeData>, options: Options, traversal: TraversalType) -> Self {
        let mut frontier = Pending::new(traversal);
        if let Some(data) = data {
            trace!("{} traversal over {} root(s)", traversal, data.roots().len());
            frontier.push_group(root_frames(data.roots(), &Accessor::new(&options)));
        }
        Self {
            options,
            frontier,
            order: 0,
        }
    }

    /// The number of nodes yielded so far.
    pub fn visited(&self) -> usize {
        self.order
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut frame = self.frontier.take()?;
        let access = Accessor::new(&self.options);
        frame.structure.order = Some(self.order);
        self.order += 1;
        let content = access.content(frame.node);
        if !frame.structure.is_leaf {
            let parent = Rc::new(content.clone());
            self.frontier
                .push_group(child_frames(&frame.structure, &parent, &access));
        }
        Some(Visit {
            content,
            structure: frame.structure,
        })
    }
}

impl std::iter::FusedIterator for Traversal<'_> {}
