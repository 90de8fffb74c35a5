//! Configuration models and layered config loading.
//!
//! This crate owns the driftlog config schema, validation, layer merging, and
//! graph credential overrides used by the CLI and the library crates.

mod credentials;
mod error;
mod loader;
mod model;

/// Credential overrides for the graph backend.
pub use credentials::CredentialOverrides;
/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layered config types and loader options.
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
/// Configuration schema models.
pub use model::*;
