use std::collections::VecDeque;

/// The pending nodes of a traversal.
///
/// A `Vec` is used as a LIFO stack and gives depth-first order, a `VecDeque` is used as a FIFO queue
/// and gives breadth-first order. Groups (the roots, or the children of one node) are added so that
/// their first element is taken first in both cases.
pub(crate) trait Frontier<T>: Default {
    /// Add a group of siblings, first sibling to be taken first.
    fn push_group(&mut self, group: Vec<T>);

    /// Take the next element, `None` once the frontier is empty.
    fn take(&mut self) -> Option<T>;
}

impl<T> Frontier<T> for Vec<T> {
    fn push_group(&mut self, group: Vec<T>) {
        self.extend(group.into_iter().rev());
    }

    fn take(&mut self) -> Option<T> {
        self.pop()
    }
}

impl<T> Frontier<T> for VecDeque<T> {
    fn push_group(&mut self, group: Vec<T>) {
        self.extend(group);
    }

    fn take(&mut self) -> Option<T> {
        self.pop_front()
    }
}
