use std::fmt::Error as FmtError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The value bound to a tree is neither null, an object, nor an array of objects.
    #[error("Invalid tree data: {0}")]
    InvalidTreeData(String),

    /// The JSON or JSONC text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A traversal name other than `dfs` or `bfs` was given.
    #[error("Unknown traversal type: {0}")]
    UnknownTraversal(String),

    /// Configuration or structure (de)serialization failed.
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error occurred while formatting the output.
    #[error("Formatting error: {0}")]
    FmtError(#[from] FmtError),
}
