use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A single search query failed. Tolerated while another query succeeds.
    #[error("Search request failed: {0}")]
    TransportError(String),

    #[error("No songs found")]
    NoResultsError,

    #[error("Failed to parse input, error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Song has no preview clip")]
    NoPreviewError,

    #[error("Failed to serialize songs, error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::TransportError(format!("HTTP {status}")),
            None => Error::TransportError(err.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
