//! Fakebook Query
//!
//! Plan and execute relational read queries.
//!
//! Responsibilities:
//! - Describe a query as a tree of relational operators (scan, filter,
//!   projection, joins, union, grouping, sorting, limits)
//! - Define the `DataSource` capability the oracle depends on
//! - Execute plans against the in-memory store
//! - Handle aggregations and null-aware sorting

mod aggregates;
mod error;
mod executor;
mod expr;
mod operators;
mod plan;
mod result;

pub use error::{QueryError, QueryResult};
pub use executor::{DataSource, QueryExecutor};
pub use expr::{col, lit, BinaryOp, Expr, UnaryOp};
pub use plan::{AggregateKind, AggregateSpec, JoinKind, PlanOp, QueryPlan, SortKey};
pub use result::QueryResults;
