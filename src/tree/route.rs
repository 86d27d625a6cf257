use log::debug;
use serde_json::Value;

use super::MultiTree;
use crate::options::{OptionParams, RouteQuery, TraversalType};

impl MultiTree {
    /// The route between the first node whose `match_key` equals `start` and the first node whose
    /// `match_key` equals `end`, both searched breadth-first.
    ///
    /// The route climbs from the start node to the lowest common ancestor and descends to the end
    /// node, listing each node's `route_key` value once. It is empty when either node is missing or
    /// when the two nodes sit in different trees of a forest.
    ///
    /// # Arguments
    ///
    /// * `start` - The value the start node holds in its `match_key` field.
    /// * `end` - The value the end node holds in its `match_key` field.
    /// * `query` - The fields to match and to build the route from.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = MultiTree::from_value(
    ///     json!({ "id": "root", "children": [
    ///         { "id": "a", "children": [{ "id": "c" }, { "id": "d" }] },
    ///         { "id": "b" }
    ///     ] }),
    ///     &OptionParams::new(),
    /// )?;
    /// let route = tree.get_route_between_two_node(&json!("c"), &json!("b"), &RouteQuery::default());
    /// assert_eq!(route, vec![json!("c"), json!("a"), json!("root"), json!("b")]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_route_between_two_node(&self, start: &Value, end: &Value, query: &RouteQuery) -> Vec<Value> {
        let params = OptionParams::new().route_key(query.route_key.as_str());
        let mut start_route = None;
        let mut end_route = None;
        self.for_each(
            |content, structure, _| {
                let field = content.get(&query.match_key);
                if start_route.is_none() && field == Some(start) {
                    start_route = Some(structure.route.clone());
                }
                if end_route.is_none() && field == Some(end) {
                    end_route = Some(structure.route.clone());
                }
            },
            TraversalType::Bfs,
            &params,
        );
        match (start_route, end_route) {
            (Some(start_route), Some(end_route)) => join_routes(start_route, &end_route),
            (start_route, end_route) => {
                debug!(
                    "no route between {} and {}: start found {}, end found {}",
                    start,
                    end,
                    start_route.is_some(),
                    end_route.is_some()
                );
                vec![]
            }
        }
    }
}

/// Climb `start` until an entry also present in `end`, then descend along `end`.
fn join_routes(mut start: Vec<Value>, end: &[Value]) -> Vec<Value> {
    let mut route = Vec::with_capacity(start.len() + end.len());
    while let Some(current) = start.pop() {
        if let Some(ancestor) = end.iter().position(|value| *value == current) {
            route.extend_from_slice(&end[ancestor..]);
            return route;
        }
        route.push(current);
    }
    debug!("routes share no ancestor");
    vec![]
}
