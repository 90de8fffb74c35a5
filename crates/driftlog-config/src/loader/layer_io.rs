//! IO helpers for reading config layers from disk.

use super::{
    ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, LoadedLayer, parse_json5,
    schema,
};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an optional layer if the provided path exists.
pub(super) fn load_optional_layer(
    source: ConfigLayerSource,
    path: &Path,
) -> Result<Option<LoadedLayer>, ConfigError> {
    if !path.exists() {
        debug!(
            "optional layer missing (source={:?}, path={})",
            source,
            path.display()
        );
        return Ok(None);
    }
    Ok(Some(load_required_layer(source, path)?))
}

/// Load and validate a required layer from disk.
pub(super) fn load_required_layer(
    source: ConfigLayerSource,
    path: &Path,
) -> Result<LoadedLayer, ConfigError> {
    debug!(
        "loading config layer (source={:?}, path={})",
        source,
        path.display()
    );
    let contents = fs::read_to_string(path).map_err(|err| ConfigError::read(path, err))?;
    let label = layer_label(source, path);
    let value = parse_json5(&contents, &label)?;
    schema::validate_layer_schema(&value, &label)?;
    Ok(LoadedLayer {
        meta: ConfigLayer {
            source,
            path: path.to_path_buf(),
        },
        value,
    })
}

/// Build a user-friendly label for schema validation errors.
pub(super) fn layer_label(source: ConfigLayerSource, path: &Path) -> String {
    let name = match source {
        ConfigLayerSource::User => "user",
        ConfigLayerSource::Project => "project",
        ConfigLayerSource::Repo => "repo",
        ConfigLayerSource::Cwd => "cwd",
        ConfigLayerSource::Runtime => "runtime",
    };
    format!("{name}({})", path.display())
}

/// Default user config path under the home directory.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}
