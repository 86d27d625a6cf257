use std::fmt::{Display, Error as FmtError, Formatter, Result as FmtResult};

use serde_json::Value;

use super::MultiTree;
use crate::access::{Accessor, Node};
use crate::prelude::Result;

impl MultiTree {
    fn print_tree(
        f: &mut Formatter<'_>,
        access: &Accessor<'_>,
        node: &Node,
        prefix: &str,
        is_last_child: Option<bool>,
    ) -> Result<()> {
        let label = label(&access.route(node));
        let child_prefix = match is_last_child {
            None => {
                writeln!(f, "{}", label)?;
                String::new()
            }
            Some(true) => {
                writeln!(f, "{}└── {}", prefix, label)?;
                format!("{}    ", prefix)
            }
            Some(false) => {
                writeln!(f, "{}├── {}", prefix, label)?;
                format!("{}│   ", prefix)
            }
        };
        let children = access.children(node);
        let children_count = children.len();
        for (index, child) in children.iter().enumerate() {
            Self::print_tree(f, access, child, &child_prefix, Some(index + 1 == children_count))?;
        }
        Ok(())
    }
}

fn label(route: &Value) -> String {
    match route {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl Display for MultiTree {
    /// Draw every root and its descendants, one line per node labelled by its route key value.
    ///
    /// Null data draws nothing.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Some(data) = &self.data else {
            return Ok(());
        };
        let access = Accessor::new(&self.options);
        for root in data.roots() {
            MultiTree::print_tree(f, &access, root, "", None).map_err(|_| FmtError)?;
        }
        Ok(())
    }
}
