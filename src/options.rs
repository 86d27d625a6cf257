use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::prelude::Result;

pub(crate) const DEFAULT_CHILDREN_KEY: &str = "children";
pub(crate) const DEFAULT_ROUTE_KEY: &str = "id";

/// A fully resolved configuration.
///
/// * `children_key` - the field holding a node's children in the input tree.
/// * `target_children_key` - the field `map` and `filter` write children under.
/// * `route_key` - the field whose values make up a node's route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub children_key:        String,
    pub target_children_key: String,
    pub route_key:           String,
}

/// A partial configuration as supplied by a caller.
///
/// Field names follow the camelCase form so that the parameters can be read straight from JSON.
///
/// ```rust
/// # use multitree::prelude::*;
/// # use serde_json::json;
/// # fn main() -> Result<()> {
/// let params = OptionParams::from_value(json!({ "childrenKey": "nodes" }))?;
/// let options = Options::resolve(&params);
/// assert_eq!(options.target_children_key, "nodes");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionParams {
    pub children_key:        Option<String>,
    pub target_children_key: Option<String>,
    pub route_key:           Option<String>,
}

impl OptionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read parameters from a JSON object. Unknown fields are ignored.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = Some(key.into());
        self
    }

    pub fn target_children_key(mut self, key: impl Into<String>) -> Self {
        self.target_children_key = Some(key.into());
        self
    }

    pub fn route_key(mut self, key: impl Into<String>) -> Self {
        self.route_key = Some(key.into());
        self
    }
}

impl Options {
    /// Merge caller parameters with the defaults.
    ///
    /// A caller that names `children_key` but not `target_children_key` gets the same key for both,
    /// otherwise caller values win over the defaults field by field.
    pub fn resolve(params: &OptionParams) -> Self {
        let mut options = Self::default();
        if let Some(children_key) = &params.children_key {
            options.target_children_key = children_key.clone();
        }
        options.overlay(params)
    }

    /// Replace each field named by `params`, keeping the rest.
    ///
    /// Unlike [`Options::resolve`], naming only `children_key` leaves `target_children_key` as it was.
    pub fn overlay(&self, params: &OptionParams) -> Self {
        Self {
            children_key:        params.children_key.clone().unwrap_or_else(|| self.children_key.clone()),
            target_children_key: params
                .target_children_key
                .clone()
                .unwrap_or_else(|| self.target_children_key.clone()),
            route_key:           params.route_key.clone().unwrap_or_else(|| self.route_key.clone()),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            children_key:        DEFAULT_CHILDREN_KEY.to_string(),
            target_children_key: DEFAULT_CHILDREN_KEY.to_string(),
            route_key:           DEFAULT_ROUTE_KEY.to_string(),
        }
    }
}

/// The order in which nodes are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalType {
    /// Depth-first pre-order, left to right.
    #[default]
    Dfs,
    /// Breadth-first level order, left to right.
    Bfs,
}

impl FromStr for TraversalType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dfs" => Ok(TraversalType::Dfs),
            "bfs" => Ok(TraversalType::Bfs),
            other => Err(Error::UnknownTraversal(other.to_string())),
        }
    }
}

impl Display for TraversalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TraversalType::Dfs => write!(f, "dfs"),
            TraversalType::Bfs => write!(f, "bfs"),
        }
    }
}

/// Keys used by [`MultiTree::get_route_between_two_node`](crate::prelude::MultiTree::get_route_between_two_node).
///
/// `match_key` selects the field compared against the start and end values, `route_key` the field
/// whose values make up the returned path.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteQuery {
    pub match_key: String,
    pub route_key: String,
}

impl RouteQuery {
    pub fn new(match_key: impl Into<String>, route_key: impl Into<String>) -> Self {
        Self {
            match_key: match_key.into(),
            route_key: route_key.into(),
        }
    }
}

impl Default for RouteQuery {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_KEY, DEFAULT_ROUTE_KEY)
    }
}
