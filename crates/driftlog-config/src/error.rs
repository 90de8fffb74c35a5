//! Config error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, merging, and validating driftlog config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// `origin` is a file path or a layer label.
    #[error("failed to parse {origin}: {source}")]
    ParseFailed {
        origin: String,
        #[source]
        source: json5::Error,
    },
    #[error("failed to decode merged config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Malformed credentials file.
    #[error("failed to read credentials from {path}: {source}")]
    CredentialsFailed {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}
