//! Oracle configuration.

use fakebook_core::TableNames;

/// Sibling candidates must be born less than this many years apart.
pub const DEFAULT_SIBLING_YEAR_GAP: i64 = 10;

/// Configuration for a [`FakebookOracle`](crate::FakebookOracle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Physical table names the generated plans read.
    pub tables: TableNames,
    /// Exclusive upper bound on the birth-year gap of potential siblings.
    pub sibling_year_gap: i64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            sibling_year_gap: DEFAULT_SIBLING_YEAR_GAP,
        }
    }
}

impl OracleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from explicitly named tables.
    pub fn with_tables(mut self, tables: TableNames) -> Self {
        self.tables = tables;
        self
    }

    /// Read from tables that share a schema-qualified prefix.
    pub fn with_table_prefix(self, prefix: &str) -> Self {
        self.with_tables(TableNames::with_prefix(prefix))
    }

    pub fn with_sibling_year_gap(mut self, gap: i64) -> Self {
        self.sibling_year_gap = gap;
        self
    }
}
