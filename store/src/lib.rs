//! Fakebook Store
//!
//! This crate provides the read-only, in-memory table storage the query
//! executor runs against:
//! - Named tables with fixed column layouts
//! - A validating builder that enforces the schema invariants (unique keys,
//!   one friendship row per unordered pair, smaller id first, no self pairs,
//!   at most one current city and one hometown per user)

mod builder;
mod database;
mod error;

pub use builder::DatabaseBuilder;
pub use database::{Database, Table};
pub use error::{StoreError, StoreResult};
