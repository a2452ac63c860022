//! Error types for shardroute-sql.
//!
//! Minimal error types without routing dependencies.

use thiserror::Error;

/// SQL front end error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Malformed pagination clause at position {position}: expected integer or '?', found {found}")]
    MalformedPaginationClause { position: usize, found: String },

    #[error("Unsupported pagination syntax: {0}")]
    UnsupportedPaginationSyntax(String),
}

/// Result type for SQL front end operations
pub type SqlResult<T> = Result<T, SqlError>;

impl serde::Serialize for SqlError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
