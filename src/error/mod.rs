//! Error handling for the expected-counts pipeline.

pub mod util;

use std::io;

use arrow::error::ArrowError;

/// Specialized error type for loading, filtering and aggregating study tables
#[derive(Debug, thiserror::Error)]
pub enum ExpectedError {
    /// Error opening or reading a local file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error building or slicing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error decoding tab-delimited text
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error talking to the object store
    #[error("Storage error: {0}")]
    Storage(#[from] object_store::Error),

    /// Error encoding or decoding JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A filter could not be evaluated against a table
    #[error("Filter error: {0}")]
    Filter(String),

    /// The request is missing a field or carries a value of the wrong shape
    #[error("{0}")]
    InvalidRequest(String),

    /// Storage or server configuration is incomplete
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExpectedError {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a filter error
    pub fn filter(message: impl Into<String>) -> Self {
        Self::Filter(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for expected-counts operations
pub type Result<T> = std::result::Result<T, ExpectedError>;
