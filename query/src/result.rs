//! Query result types.

use fakebook_core::Row;

use crate::expr::resolve_column;
use crate::QueryResult;

/// Query results: column names and the ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResults {
    /// Column names.
    column_names: Vec<String>,
    /// Rows of results.
    rows: Vec<Row>,
}

impl QueryResults {
    /// Create an empty result set with column names.
    pub fn with_columns(names: Vec<String>) -> Self {
        Self {
            column_names: names,
            rows: Vec::new(),
        }
    }

    /// Create a result set from columns and rows.
    pub fn from_rows(names: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            column_names: names,
            rows,
        }
    }

    /// Add a row to the results.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if results are empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column names.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Position of a column, by exact or unambiguous bare name.
    pub fn column_index(&self, name: &str) -> QueryResult<usize> {
        resolve_column(&self.column_names, name)
    }

    /// Get all rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Split into column names and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.column_names, self.rows)
    }

    /// Convert to vector of rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for QueryResults {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResults {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
