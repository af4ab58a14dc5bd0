//! Error types for Tributary

use thiserror::Error;

use crate::origin::OriginFault;
use crate::remote::ParseError;

/// Result type alias for Tributary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Tributary operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Git error (opening a clone, reading its remotes)
    #[error("Git error: {0}")]
    Git(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A remote string matched no supported dialect
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The origin guard refused a poll cycle
    #[error(transparent)]
    Origin(#[from] Box<OriginFault>),

    /// Commit ingestion failed; retried with backoff
    #[error("Ingestion error: {0}")]
    Ingest(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Self {
        Error::Git(e.message().to_string())
    }
}

impl From<OriginFault> for Error {
    fn from(fault: OriginFault) -> Self {
        Error::Origin(Box::new(fault))
    }
}
