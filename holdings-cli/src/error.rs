use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Spreadsheet could not be read or written
    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),

    /// Google Books client error
    #[error("API error: {0}")]
    Api(String),

    /// Image conversion error
    #[error("Image error: {0}")]
    Media(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn sheet(msg: impl Into<String>) -> Self {
        Self::Sheet(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub(crate) fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}
