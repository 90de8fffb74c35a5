//! Error types for the core crate.

use driftlog_config::ConfigError;
use driftlog_memory::MemoryError;
use thiserror::Error;

/// Errors returned by context reconstruction and workspace operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record store error.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// IO error outside the record store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// True when a persisted record failed to decode.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Memory(err) if err.is_parse())
    }
}
