//! Error types for the message file parser and report renderers.

use std::path::PathBuf;

/// Result type alias for lsti operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading message files or rendering reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single message file could not be opened or read
    #[error("Cannot read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JMESPath expression or failed evaluation
    #[error("Query error: {0}")]
    Query(String),

    /// Query result does not have the shape of a report batch
    #[error("Cannot render query result: {0}")]
    Shape(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV/TSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8 encoding/decoding error
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// No message files were found for the given paths
    #[error("No input files")]
    NoInput,
}
