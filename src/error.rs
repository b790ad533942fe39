//! Error types shared by the index client, readers and sinks.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Hard failures. Business-level misses (no match, unresolvable redirect,
/// missing coordinates) are not errors and never surface here.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid index response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No reader available for file format '{0}'")]
    UnknownFileFormat(String),

    #[error("Column '{0}' not found in input header")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResolveError {
    /// Transport failures may succeed on a later attempt; everything else won't.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
