use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Provider or database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Malformed user input (JSON, assignments)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<flickster_db::ProviderError> for CliError {
    fn from(e: flickster_db::ProviderError) -> Self {
        Self::database(e.to_string())
    }
}
