//! Fakebook Core Types
//!
//! This crate provides the foundational types shared by the store, the query
//! executor and the oracle:
//! - Identity types (UserId, CityId, EventId, AlbumId, PhotoId)
//! - Value types (the Value enum with the scalar types a row may hold)
//! - Rows with typed, nullable column accessors
//! - Entity records (User, Friendship, City, ...) and their row layouts
//! - Table names and column names of the social-network schema
//! - Common error types

mod entity;
mod error;
mod id;
mod row;
pub mod schema;
mod value;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use row::*;
pub use schema::TableNames;
pub use value::*;
