//! Common error types for Fakebook rows.

use thiserror::Error;

/// Errors that can occur while reading typed fields out of a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Column index past the end of the row.
    #[error("Column {index} out of range for row of arity {arity}")]
    ColumnOutOfRange { index: usize, arity: usize },

    /// Column holds a value of the wrong type.
    #[error("Type mismatch in column {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// Column is null where a value is required.
    #[error("Unexpected null in column {index}")]
    UnexpectedNull { index: usize },
}

/// Result type for row access.
pub type CoreResult<T> = Result<T, CoreError>;
