use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::EngineError;

/// Errors surfaced by the movie provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The identifier matches no known shape, or the shape does not support
    /// the requested operation.
    #[error("Unsupported resource: {uri}")]
    UnsupportedResource { uri: String },

    /// The engine reported an invalid row id for a single insert.
    #[error("Failed to insert row into {uri}")]
    InsertFailed { uri: String },

    /// Storage engine failure, passed through unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The database could not be opened or migrated.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ProviderError {
    pub fn unsupported(uri: impl Into<String>) -> Self {
        Self::UnsupportedResource { uri: uri.into() }
    }

    pub fn insert_failed(uri: impl Into<String>) -> Self {
        Self::InsertFailed { uri: uri.into() }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedResource { .. })
    }
}

impl From<rusqlite::Error> for ProviderError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Engine(EngineError::Sqlite(e))
    }
}
