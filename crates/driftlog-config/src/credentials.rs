//! Graph credential overrides from `KEY=VALUE` files and the environment.

use crate::{ConfigError, GraphConfig};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

const URI_KEY: &str = "NEO4J_URI";
const USER_KEY: &str = "NEO4J_USER";
const PASSWORD_KEY: &str = "NEO4J_PASSWORD";
const DATABASE_KEY: &str = "NEO4J_DATABASE";

/// Credential values that replace the configured graph connection fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialOverrides {
    pub uri: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl CredentialOverrides {
    /// Collect overrides from a key lookup (environment or parsed file).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            uri: read(URI_KEY),
            user: read(USER_KEY),
            password: read(PASSWORD_KEY),
            database: read(DATABASE_KEY),
        }
    }

    /// Collect overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Collect overrides from a dotenv-style file; a missing file yields none.
    ///
    /// Quoted values are unquoted and an `export ` prefix is accepted.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("credential file missing (path={})", path.display());
            return Ok(Self::default());
        }
        let failed = |source| ConfigError::CredentialsFailed {
            path: path.to_path_buf(),
            source,
        };
        let values = dotenvy::from_path_iter(path)
            .map_err(failed)?
            .collect::<Result<BTreeMap<String, String>, _>>()
            .map_err(failed)?;
        debug!(
            "loaded credential file (path={}, keys={})",
            path.display(),
            values.len()
        );
        Ok(Self::from_lookup(|key| values.get(key).cloned()))
    }

    /// Layer `other` on top of `self`; set fields in `other` win.
    pub fn overlay(self, other: Self) -> Self {
        Self {
            uri: other.uri.or(self.uri),
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            database: other.database.or(self.database),
        }
    }

    /// Apply the overrides to a graph config.
    pub fn apply(self, config: &mut GraphConfig) {
        if let Some(uri) = self.uri {
            config.uri = uri;
        }
        if let Some(user) = self.user {
            config.user = user;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(database) = self.database {
            config.database = database;
        }
    }
}

impl GraphConfig {
    /// Resolve credentials: config values, then the env file, then the
    /// process environment.
    pub fn with_credential_overrides(mut self, project_root: &Path) -> Result<Self, ConfigError> {
        let from_file = match self.env_file.as_deref() {
            Some(file) => CredentialOverrides::from_env_file(&project_root.join(file))?,
            None => CredentialOverrides::default(),
        };
        from_file
            .overlay(CredentialOverrides::from_env())
            .apply(&mut self);
        Ok(self)
    }
}
