//! Error types for kaggle-etl
//!
//! Two families of errors exist:
//! - [`Error`]: fatal failures of the fetch stage (authentication, network,
//!   provider responses, extraction, configuration). These propagate to the caller.
//! - [`ReshapeError`]: failures of the reshape stage. The pipeline contains these,
//!   logs them, and carries on.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for kaggle-etl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kaggle-etl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "json_filename")
        key: Option<String>,
    },

    /// Credentials are missing, unreadable, or rejected by the provider
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider error (HTTP {status}): {message}")]
    Provider {
        /// HTTP status code returned by the provider
        status: u16,
        /// Response body or a short description
        message: String,
    },

    /// Archive extraction failed
    #[error("extraction failed for {archive}: {reason}")]
    Extraction {
        /// The archive file that failed to extract
        archive: PathBuf,
        /// The reason extraction failed
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Reasons the reshape step can fail
///
/// None of these leave the source file modified or an output file behind.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// The input vanished between the existence check and the open
    #[error("JSON file not found: {}", path.display())]
    NotFound {
        /// The missing input file
        path: PathBuf,
    },

    /// The input is not valid JSON
    #[error("JSON parsing error in {}: {source}", path.display())]
    Malformed {
        /// The input file that failed to parse
        path: PathBuf,
        /// The parser's error, including line and column
        #[source]
        source: serde_json::Error,
    },

    /// The input parsed, but its top-level value is not an object
    #[error("expected object at top level in {}, found {found}", path.display())]
    Schema {
        /// The input file with the unexpected shape
        path: PathBuf,
        /// The kind of JSON value found instead (e.g., "array")
        found: &'static str,
    },

    /// Reading the input or writing the output failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ReshapeError {
    /// Classify an I/O error on `path`, mapping `NotFound` to its own variant
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ReshapeError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReshapeError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Whether the input file was simply missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReshapeError::NotFound { .. })
    }
}
