use std::rc::Rc;

use log::warn;
use serde_json::{Map, Value};

use crate::options::Options;

/// A tree node: an ordered map of caller-defined fields.
pub type Node = Map<String, Value>;

/// Reads and writes the configured fields of a node.
///
/// Nothing else in the crate looks a field up by its configured name; the traversal, structure and
/// tree code go through this type.
#[derive(Clone, Copy, Debug)]
pub struct Accessor<'o> {
    options: &'o Options,
}

impl<'o> Accessor<'o> {
    pub fn new(options: &'o Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &'o Options {
        self.options
    }

    /// The node's children.
    ///
    /// Anything other than an array under the children key reads as no children. Array entries that
    /// are not objects are skipped.
    pub fn children<'a>(&self, node: &'a Node) -> Rc<[&'a Node]> {
        match node.get(&self.options.children_key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    let child = item.as_object();
                    if child.is_none() {
                        warn!(
                            "skipping non-object entry under `{}`: {}",
                            self.options.children_key, item
                        );
                    }
                    child
                })
                .collect(),
            _ => Rc::from(Vec::new()),
        }
    }

    /// The node's route value, `Null` when the route field is missing.
    pub fn route(&self, node: &Node) -> Value {
        node.get(&self.options.route_key).cloned().unwrap_or(Value::Null)
    }

    /// A copy of the node without its children field.
    pub fn content(&self, node: &Node) -> Node {
        node.iter()
            .filter(|(key, _)| **key != self.options.children_key)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Store `children` under the target children key.
    pub fn set_children(&self, node: &mut Node, children: Vec<Node>) {
        node.insert(
            self.options.target_children_key.clone(),
            Value::Array(children.into_iter().map(Value::Object).collect()),
        );
    }
}

/// Look up a dotted field path such as `"meta.owner.id"`.
///
/// Any missing segment, or a segment applied to a non-object, yields `Null`.
pub fn get_path(node: &Node, path: &str) -> Value {
    let mut segments = path.split('.');
    let first = match segments.next() {
        Some(segment) => segment,
        None => return Value::Null,
    };
    let mut current = match node.get(first) {
        Some(value) => value,
        None => return Value::Null,
    };
    for segment in segments {
        current = match current.get(segment) {
            Some(value) => value,
            None => return Value::Null,
        };
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::options::OptionParams;

    fn node(value: Value) -> Node {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_children_reads_configured_key() {
        let options = Options::resolve(&OptionParams::new().children_key("child"));
        let access = Accessor::new(&options);
        let n = node(json!({ "id": 1, "child": [{ "id": 2 }, { "id": 3 }], "children": [{ "id": 4 }] }));
        let children = access.children(&n);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["id"], json!(2));
        assert_eq!(children[1]["id"], json!(3));
    }

    #[test]
    fn test_children_not_an_array() {
        let options = Options::default();
        let access = Accessor::new(&options);
        assert!(access.children(&node(json!({ "children": "oops" }))).is_empty());
        assert!(access.children(&node(json!({ "children": { "id": 1 } }))).is_empty());
        assert!(access.children(&node(json!({ "id": 1 }))).is_empty());
    }

    #[test]
    fn test_children_skips_non_objects() {
        let options = Options::default();
        let access = Accessor::new(&options);
        let n = node(json!({ "children": [1, { "id": "a" }, null] }));
        let children = access.children(&n);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0]["id"], json!("a"));
    }

    #[test]
    fn test_route_missing_is_null() {
        let options = Options::default();
        let access = Accessor::new(&options);
        assert_eq!(access.route(&node(json!({ "id": "x" }))), json!("x"));
        assert_eq!(access.route(&node(json!({ "name": "x" }))), Value::Null);
    }

    #[test]
    fn test_content_strips_children_and_keeps_order() {
        let options = Options::default();
        let access = Accessor::new(&options);
        let n = node(json!({ "z": 1, "children": [], "a": 2 }));
        let content = access.content(&n);
        assert_eq!(content.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert!(n.contains_key("children"));
    }

    #[test]
    fn test_set_children_uses_target_key() {
        let options = Options::resolve(&OptionParams::new().target_children_key("nodes"));
        let access = Accessor::new(&options);
        let mut n = node(json!({ "id": 1 }));
        access.set_children(&mut n, vec![node(json!({ "id": 2 }))]);
        assert_eq!(Value::Object(n), json!({ "id": 1, "nodes": [{ "id": 2 }] }));
    }

    #[test]
    fn test_get_path() {
        let n = node(json!({ "id": 1, "meta": { "owner": { "id": "u1" } } }));
        assert_eq!(get_path(&n, "id"), json!(1));
        assert_eq!(get_path(&n, "meta.owner.id"), json!("u1"));
        assert_eq!(get_path(&n, "meta.missing.id"), Value::Null);
        assert_eq!(get_path(&n, "id.deeper"), Value::Null);
        assert_eq!(get_path(&n, ""), Value::Null);
    }
}
