//! Error types for core domain data.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building core domain data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A panic table key is not an integer between 1 and 15.
    #[error("invalid panic table key: {0}")]
    InvalidTableKey(String),

    /// A panic table has no effect for the given index.
    #[error("panic table is missing index {0}")]
    MissingTableIndex(u32),

    /// The panic table source could not be parsed.
    #[error("malformed panic table: {0}")]
    MalformedTable(#[from] serde_json::Error),
}
