//! SQLite persistence layer for the movie store.
//!
//! Provides schema creation, the URI router and selection builder, and the
//! `MovieProvider` façade for query/insert/update/delete with change
//! notification, backed by SQLite (via rusqlite with bundled feature).

pub mod clock;
pub mod error;
pub mod notify;
pub mod provider;
pub mod schema;
pub mod selection;
pub mod store;
pub mod uri;

pub use clock::{DayClock, FixedDayClock, SystemDayClock};
pub use error::ProviderError;
pub use notify::{ChangeEvent, ChangeNotifier, NoopNotifier, ObserverRegistry};
pub use provider::MovieProvider;
pub use schema::{SchemaError, open_database, open_memory};
pub use selection::{Query, Selection};
pub use store::{EngineError, MovieStore, RowSet};
pub use uri::{MovieFilter, MovieUri, ResourceShape};
