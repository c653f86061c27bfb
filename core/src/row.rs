//! Fixed-arity rows with typed column accessors.

use crate::{CoreError, CoreResult, Value};

/// A single row: an ordered tuple of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Create a row from its values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of columns.
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Get a column value by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get all column values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the row into its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Concatenate two rows (used by joins).
    pub fn concat(&self, other: &Row) -> Row {
        let mut values = Vec::with_capacity(self.arity() + other.arity());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);
        Row { values }
    }

    /// Extend this row with `count` nulls (used by outer joins).
    pub fn pad_nulls(&self, count: usize) -> Row {
        let mut values = self.values.clone();
        values.extend(std::iter::repeat(Value::Null).take(count));
        Row { values }
    }

    fn value(&self, index: usize) -> CoreResult<&Value> {
        self.values.get(index).ok_or(CoreError::ColumnOutOfRange {
            index,
            arity: self.values.len(),
        })
    }

    /// Read a nullable integer column.
    pub fn opt_int(&self, index: usize) -> CoreResult<Option<i64>> {
        match self.value(index)? {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(*i)),
            other => Err(CoreError::TypeMismatch {
                index,
                expected: "Int",
                actual: other.type_name(),
            }),
        }
    }

    /// Read a non-null integer column.
    pub fn int(&self, index: usize) -> CoreResult<i64> {
        self.opt_int(index)?
            .ok_or(CoreError::UnexpectedNull { index })
    }

    /// Read a nullable text column.
    pub fn opt_text(&self, index: usize) -> CoreResult<Option<&str>> {
        match self.value(index)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s)),
            other => Err(CoreError::TypeMismatch {
                index,
                expected: "Text",
                actual: other.type_name(),
            }),
        }
    }

    /// Read a non-null text column.
    pub fn text(&self, index: usize) -> CoreResult<&str> {
        self.opt_text(index)?
            .ok_or(CoreError::UnexpectedNull { index })
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// Build a row from a list of expressions convertible into `Value`.
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new(Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Row::new(vec![$($crate::Value::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        // GIVEN
        let row = row![7i64, "Ada", Value::Null];

        // THEN
        assert_eq!(row.arity(), 3);
        assert_eq!(row.int(0), Ok(7));
        assert_eq!(row.text(1), Ok("Ada"));
        assert_eq!(row.opt_text(2), Ok(None));
        assert_eq!(row.opt_int(2), Ok(None));
    }

    #[test]
    fn test_accessor_errors() {
        // GIVEN
        let row = row![7i64, Value::Null];

        // THEN
        assert_eq!(
            row.text(0),
            Err(CoreError::TypeMismatch {
                index: 0,
                expected: "Text",
                actual: "Int"
            })
        );
        assert_eq!(row.int(1), Err(CoreError::UnexpectedNull { index: 1 }));
        assert_eq!(
            row.int(5),
            Err(CoreError::ColumnOutOfRange { index: 5, arity: 2 })
        );
    }

    #[test]
    fn test_concat_and_pad() {
        // GIVEN
        let left = row![1i64];
        let right = row!["x"];

        // WHEN
        let joined = left.concat(&right);
        let padded = left.pad_nulls(2);

        // THEN
        assert_eq!(joined, row![1i64, "x"]);
        assert_eq!(padded, row![1i64, Value::Null, Value::Null]);
    }
}
