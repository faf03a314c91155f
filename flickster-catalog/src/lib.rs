//! Movie data model types, resource-identifier contract, and date buckets.
//!
//! This crate defines the persistent data model for the movie store without
//! any database dependencies. Consumers can use these types directly for
//! serialization, display, or passing to `flickster-db` for persistence.

pub mod contract;
pub mod date;
pub mod types;

pub use contract::ContentKind;
pub use date::{nearest_day, today};
pub use types::*;
