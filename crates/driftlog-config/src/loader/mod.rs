//! Layered configuration loader.
//!
//! Discovers configuration layers (user/project/repo/cwd/runtime), validates
//! each against the schema, merges them, and produces a final `DriftlogConfig`.

mod layer_io;
mod merge;
mod schema;
mod paths;


use crate::{ConfigError, DriftlogConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "driftlog.json5";
/// Default config directory under user or repo roots.
const DEFAULT_CONFIG_DIR: &str = ".driftlog";
/// Marker files/dirs that identify a project root.
const DEFAULT_PROJECT_ROOT_MARKERS: &[&str] = &[".git"];

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: DriftlogConfig,
    /// Metadata for each layer that contributed to the config.
    pub layers: Vec<ConfigLayer>,
    /// Project root detected from the working directory, if any.
    pub project_root: Option<PathBuf>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// User-specific configuration.
    User,
    /// Project root configuration.
    Project,
    /// Repo-local configuration under the config directory.
    Repo,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory used to resolve local layers.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.driftlog/driftlog.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last.
    pub runtime_paths: Vec<PathBuf>,
    /// Marker files/dirs used to detect the project root.
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
            project_root_markers: DEFAULT_PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl DriftlogConfig {
    /// Load a single config file without layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::read(path, err))?;
        let origin = path.display().to_string();
        config_from_value(parse_json5(&contents, &origin)?, &origin)
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        config_from_value(parse_json5(contents, "config")?, "config")
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Layer precedence (low -> high): user, project, repo, cwd, runtime.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = paths::canonical_or_self(&options.cwd);
        debug!("normalized cwd for config load: {}", cwd.display());
        let project_root = paths::find_project_root(&cwd, &options.project_root_markers);
        match project_root.as_ref() {
            Some(root) => debug!("resolved project root: {}", root.display()),
            None => debug!("project root not found; skipping project/repo layers"),
        }

        let mut candidates = Vec::new();
        if let Some(path) = options.user_config_path.clone() {
            candidates.push((ConfigLayerSource::User, path));
        }
        if let Some(root) = project_root.as_ref() {
            candidates.push((ConfigLayerSource::Project, root.join(DEFAULT_CONFIG_FILE)));
            candidates.push((
                ConfigLayerSource::Repo,
                root.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE),
            ));
        }
        candidates.push((ConfigLayerSource::Cwd, cwd.join(DEFAULT_CONFIG_FILE)));

        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());
        let mut seen_paths = HashSet::new();

        for (source, path) in candidates {
            let Some(layer) = layer_io::load_optional_layer(source, &path)? else {
                continue;
            };
            if !seen_paths.insert(paths::canonical_or_self(&path)) {
                debug!(
                    "skipping duplicate layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }

        for runtime_path in &options.runtime_paths {
            let layer = layer_io::load_required_layer(ConfigLayerSource::Runtime, runtime_path)?;
            debug!("loaded runtime layer (path={})", runtime_path.display());
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig {
            config,
            layers,
            project_root,
        })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.dir.trim().is_empty() {
            return Err(ConfigError::Invalid("memory.dir must not be empty".to_string()));
        }
        if self.context.recent_decision_days == 0 {
            return Err(ConfigError::Invalid(
                "context.recent_decision_days must be at least 1".to_string(),
            ));
        }
        if self.context.drift_window_days == 0 {
            return Err(ConfigError::Invalid(
                "context.drift_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Internal representation of a loaded config layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

/// Parse JSON5 text, naming `origin` on failure.
fn parse_json5(contents: &str, origin: &str) -> Result<Value, ConfigError> {
    json5::from_str(contents).map_err(|source| ConfigError::ParseFailed {
        origin: origin.to_string(),
        source,
    })
}

fn config_from_value(value: Value, label: &str) -> Result<DriftlogConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: DriftlogConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
