//! # Multitree
//! Traversal and transformation of JSON trees and forests.
//!
//! A tree is a JSON object whose children live in an array under a configurable field (`children` by
//! default). A forest is an array of such trees. Every node visited by this crate is described by a
//! [`Structure`](prelude::Structure): its depth, position index, route from the root, siblings,
//! children and parent. None of it is stored on the caller's data, which is never modified.
//!
//! ## Usage
//!
//! ```rust
//! use multitree::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let tree = MultiTree::from_value(
//!     json!({
//!         "id": "root",
//!         "children": [
//!             { "id": "a", "children": [{ "id": "c" }, { "id": "d" }] },
//!             { "id": "b" }
//!         ]
//!     }),
//!     &OptionParams::new(),
//! )?;
//!
//! let mut visited = vec![];
//! tree.for_each(
//!     |content, structure, _| visited.push((content["id"].clone(), structure.depth)),
//!     TraversalType::Dfs,
//!     &OptionParams::new(),
//! );
//! assert_eq!(visited[2], (json!("c"), 2));
//!
//! let route = tree.get_route_between_two_node(&json!("c"), &json!("b"), &RouteQuery::default());
//! assert_eq!(route, vec![json!("c"), json!("a"), json!("root"), json!("b")]);
//! # Ok(())
//! # }
//! ```
//!
//! The tree prints one line per node, labelled by the route key:
//!
//! ```rust
//! # use multitree::prelude::*;
//! # use serde_json::json;
//! # fn main() -> Result<()> {
//! let tree = MultiTree::from_jsonc(
//!     r#"{
//!         // comments are allowed
//!         "name": "home",
//!         "child": [{ "name": "docs", "child": [{ "name": "intro" }] }, { "name": "blog" }]
//!     }"#,
//!     &OptionParams::new().children_key("child").route_key("name"),
//! )?;
//! # assert_eq!(tree.to_string(), "home\n├── docs\n│   └── intro\n└── blog\n");
//! # Ok(())
//! # }
//! ```
//!
//! ```text
//! home
//! ├── docs
//! │   └── intro
//! └── blog
//! ```
//!
//! ## Configuration
//!
//! * `children_key` - the field children are read from.
//! * `target_children_key` - the field `map` and `filter` write children to. Follows `children_key`
//!   unless set.
//! * `route_key` - the field whose values build each node's route.
//!
//! Options given to [`MultiTree::new`](prelude::MultiTree::new) are merged with the defaults; options
//! given to an operation only replace the fields they name, for that call.

mod access;
mod data;
mod error;
mod frontier;
mod options;
mod structure;
mod traverse;
mod tree;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::access::{get_path, Accessor, Node};
    pub use crate::data::TreeData;
    pub use crate::error::Error;
    pub use crate::options::{OptionParams, Options, RouteQuery, TraversalType};
    pub use crate::structure::Structure;
    pub use crate::traverse::{bfs_traverse, dfs_traverse, Traversal, Visit};
    pub use crate::tree::{MultiTree, NodesAndRelations, Relation, PARENT_KEY, STRUCTURE_KEY};

    pub type Result<T> = std::result::Result<T, Error>;
}
