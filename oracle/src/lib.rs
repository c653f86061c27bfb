//! Fakebook Oracle
//!
//! Analytical questions over the social-network schema, answered by running
//! relational plans against a [`DataSource`](fakebook_query::DataSource).
//!
//! Responsibilities:
//! - Build one or more plans per operation and decode their rows into typed
//!   result records
//! - Apply one fixed tie policy per operation so every answer is deterministic
//! - Treat missing data as an empty answer and data-source failures as errors,
//!   logging failures with the operation name
//!
//! ```text
//! let db = builder.build();
//! let oracle = FakebookOracle::new(QueryExecutor::new(&db));
//! let months = oracle.find_month_of_birth_info()?;
//! ```

mod birthdays;
mod config;
mod error;
mod events;
mod info;
mod names;
mod oracle;
mod photos;
mod relations;
mod request;
mod social;

pub use config::{OracleConfig, DEFAULT_SIBLING_YEAR_GAP};
pub use error::{OracleError, OracleResult};
pub use info::{
    AgeInfo, BirthMonthInfo, EventStateInfo, FirstNameInfo, MatchPair, PhotoInfo, SiblingInfo,
    TaggedPhotoInfo, UserInfo, UsersPair,
};
pub use oracle::FakebookOracle;
pub use request::{Request, Response};
