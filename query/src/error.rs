//! Query error types.

use fakebook_core::CoreError;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur during query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown table: {name}")]
    UnknownTable { name: String },

    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("Ambiguous column: {name}")]
    AmbiguousColumn { name: String },

    #[error("Column used before binding: {name}")]
    UnboundColumn { name: String },

    #[error("Type error: {message}")]
    TypeError { message: String },

    #[error("Arity mismatch: expected {expected} columns, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("Row error: {0}")]
    Row(#[from] CoreError),

    #[error("Data source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl QueryError {
    pub fn unknown_table(name: impl Into<String>) -> Self {
        Self::UnknownTable { name: name.into() }
    }

    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    pub fn ambiguous_column(name: impl Into<String>) -> Self {
        Self::AmbiguousColumn { name: name.into() }
    }

    pub fn unbound_column(name: impl Into<String>) -> Self {
        Self::UnboundColumn { name: name.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError {
            message: message.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
