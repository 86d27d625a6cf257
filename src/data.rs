use jsonc_parser::{parse_to_serde_value, ParseOptions};
use serde_json::Value;

use crate::access::Node;
use crate::error::Error::{InvalidTreeData, Parse};
use crate::prelude::Result;

/// A single tree or a forest of trees.
///
/// Every operation walks [`TreeData::roots`], so a single root behaves like a one-tree forest; the
/// variant only decides whether results come back as one root or as a sequence of roots.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeData {
    Single(Node),
    Forest(Vec<Node>),
}

impl TreeData {
    /// Classify a JSON value.
    ///
    /// `null` yields `None`, an object a single tree, an array of objects a forest.
    ///
    /// ```rust
    /// # use multitree::prelude::*;
    /// # use serde_json::json;
    /// # fn main() -> Result<()> {
    /// let data = TreeData::from_value(json!([{ "id": 1 }, { "id": 2 }]))?;
    /// assert_eq!(data.map(|d| d.roots().len()), Some(2));
    /// assert!(TreeData::from_value(json!(null))?.is_none());
    /// assert!(TreeData::from_value(json!(3)).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(node) => Ok(Some(TreeData::Single(node))),
            Value::Array(items) => {
                let mut roots = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Object(node) => roots.push(node),
                        other => {
                            return Err(InvalidTreeData(format!(
                                "root {} is not an object: {}",
                                index, other
                            )))
                        }
                    }
                }
                Ok(Some(TreeData::Forest(roots)))
            }
            other => Err(InvalidTreeData(format!(
                "expected an object, an array or null, found {}",
                other
            ))),
        }
    }

    /// Parse JSON or JSON-with-comments text and classify it with [`TreeData::from_value`].
    ///
    /// Text holding no value at all yields `None`.
    pub fn from_jsonc(text: &str) -> Result<Option<Self>> {
        let value = parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| Parse(e.to_string()))?;
        match value {
            Some(value) => Self::from_value(value),
            None => Ok(None),
        }
    }

    /// The root nodes, in order.
    pub fn roots(&self) -> &[Node] {
        match self {
            TreeData::Single(node) => std::slice::from_ref(node),
            TreeData::Forest(nodes) => nodes,
        }
    }

    pub fn is_forest(&self) -> bool {
        matches!(self, TreeData::Forest(_))
    }

    /// Turn the data back into a JSON value.
    pub fn into_value(self) -> Value {
        match self {
            TreeData::Single(node) => Value::Object(node),
            TreeData::Forest(nodes) => Value::Array(nodes.into_iter().map(Value::Object).collect()),
        }
    }

    /// Rebuild a result in the same shape as `self`: a single root stays single, a forest stays a forest.
    pub(crate) fn same_shape(&self, mut roots: Vec<Node>) -> Option<Self> {
        if self.is_forest() {
            Some(TreeData::Forest(roots))
        } else {
            roots.pop().map(TreeData::Single)
        }
    }
}

impl From<Node> for TreeData {
    fn from(node: Node) -> Self {
        TreeData::Single(node)
    }
}

impl From<Vec<Node>> for TreeData {
    fn from(nodes: Vec<Node>) -> Self {
        TreeData::Forest(nodes)
    }
}
