//! Oracle error types.

use fakebook_core::CoreError;
use fakebook_query::QueryError;
use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors returned by the oracle operations.
///
/// Empty data is never an error; these only report a failing data source or
/// rows that do not have the shape an operation expects.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Data source error: {0}")]
    DataSource(#[from] QueryError),

    #[error("Malformed row: {0}")]
    Row(#[from] CoreError),

    #[error("Unexpected result shape in {operation}: {message}")]
    Shape { operation: String, message: String },
}

impl OracleError {
    pub fn shape(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_query_and_row_errors() {
        // GIVEN
        let query: OracleError = QueryError::unavailable("connection reset").into();
        let row: OracleError = CoreError::UnexpectedNull { index: 2 }.into();

        // THEN
        assert!(matches!(query, OracleError::DataSource(_)));
        assert!(matches!(row, OracleError::Row(_)));
        assert!(query.to_string().contains("connection reset"));
    }
}
