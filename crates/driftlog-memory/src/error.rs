//! Error types for record store operations.

use std::path::PathBuf;

/// Errors returned by record stores and the summarizer.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A persisted document exists but does not decode into its record type.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// Encoding a record failed.
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_yaml::Error),
    /// Session id cannot be used as a document name.
    #[error("invalid session id: {0:?}")]
    InvalidSessionId(String),
}

impl MemoryError {
    /// True when the error came from decoding a persisted document.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
