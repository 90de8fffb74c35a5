//! Schema validation helpers for driftlog JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "memory", "context", "graph"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("memory") {
        validate_memory(value, layer, "memory")?;
    }
    if let Some(value) = map.get("context") {
        validate_context(value, layer, "context")?;
    }
    if let Some(value) = map.get("graph") {
        validate_graph(value, layer, "graph")?;
    }
    Ok(())
}

/// Validate the "memory" block.
fn validate_memory(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["dir"], layer, path)?;
    if let Some(value) = map.get("dir") {
        expect_string(value, layer, &join_path(path, "dir"))?;
    }
    Ok(())
}

/// Validate the "context" block.
fn validate_context(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &[
            "recent_decision_days",
            "drift_window_days",
            "summary_count",
            "prp_file",
            "output_file",
        ],
        layer,
        path,
    )?;
    for key in ["recent_decision_days", "drift_window_days", "summary_count"] {
        if let Some(value) = map.get(key) {
            expect_u64(value, layer, &join_path(path, key))?;
        }
    }
    for key in ["prp_file", "output_file"] {
        if let Some(value) = map.get(key) {
            expect_string(value, layer, &join_path(path, key))?;
        }
    }
    Ok(())
}

/// Validate the "graph" block.
fn validate_graph(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["uri", "database", "user", "password", "env_file", "embedding"],
        layer,
        path,
    )?;
    for key in ["uri", "database", "user", "password"] {
        if let Some(value) = map.get(key) {
            expect_string(value, layer, &join_path(path, key))?;
        }
    }
    if let Some(value) = map.get("env_file") {
        expect_optional_string(value, layer, &join_path(path, "env_file"))?;
    }
    if let Some(value) = map.get("embedding") {
        validate_embedding(value, layer, &join_path(path, "embedding"))?;
    }
    Ok(())
}

/// Validate the "graph.embedding" block.
fn validate_embedding(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["base_url", "model", "api_key_env"], layer, path)?;
    for key in ["base_url", "model"] {
        if let Some(value) = map.get(key) {
            expect_string(value, layer, &join_path(path, key))?;
        }
    }
    if let Some(value) = map.get("api_key_env") {
        expect_optional_string(value, layer, &join_path(path, "api_key_env"))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a JSON string or null.
fn expect_optional_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_null() || value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string or null"))
    }
}

/// Expect a non-negative JSON integer or return a typed error.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
