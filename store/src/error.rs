//! Store error types.

use fakebook_core::UserId;
use thiserror::Error;

/// Errors that can occur while building a database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Table already defined.
    #[error("Table already exists: {0}")]
    DuplicateTable(String),

    /// Table not defined.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Row arity does not match the table's column count.
    #[error("Arity mismatch in {table}: expected {expected} columns, got {actual}")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Key already present in the table.
    #[error("Duplicate key in {table}: {key}")]
    DuplicateKey { table: String, key: String },

    /// A user cannot be friends with themselves.
    #[error("Self friendship: {0}")]
    SelfFriendship(UserId),
}

impl StoreError {
    pub fn duplicate_key(table: impl Into<String>, key: impl ToString) -> Self {
        Self::DuplicateKey {
            table: table.into(),
            key: key.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
