//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references in string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` escapes
//!   to a literal `${VAR}`.
//! - `ONTODASH_*` variables that override individual settings.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{ApiConfig, LoggingConfig, OntodashConfig, RefreshConfig};

pub const ENV_API_URL: &str = "ONTODASH_API_URL";
pub const ENV_HOST: &str = "ONTODASH_HOST";
pub const ENV_PORT: &str = "ONTODASH_PORT";
pub const ENV_REFRESH_DELAY_MS: &str = "ONTODASH_REFRESH_DELAY_MS";
pub const ENV_LOG_LEVEL: &str = "ONTODASH_LOG_LEVEL";

/// `${VAR}` with an optional leading `$` marking an escape.
static ENV_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references from `env`. Unset or empty variables are
/// an error.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_REF_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(replaced.into_owned())
}

/// Apply `ONTODASH_*` overrides on top of the file config.
pub fn apply_env_overrides(
    mut config: OntodashConfig,
    env: &HashMap<String, String>,
) -> OntodashConfig {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(url) = get(ENV_API_URL) {
        config.api.get_or_insert_with(ApiConfig::default).base_url = Some(url.to_string());
    }
    if let Some(host) = get(ENV_HOST) {
        config.api.get_or_insert_with(ApiConfig::default).host = Some(host.to_string());
    }
    if let Some(port) = get(ENV_PORT) {
        match port.parse() {
            Ok(port) => config.api.get_or_insert_with(ApiConfig::default).port = Some(port),
            Err(_) => tracing::warn!(value = port, "Ignoring invalid {ENV_PORT}"),
        }
    }
    if let Some(delay) = get(ENV_REFRESH_DELAY_MS) {
        match delay.parse() {
            Ok(ms) => {
                config.refresh.get_or_insert_with(RefreshConfig::default).delay_ms = Some(ms)
            }
            Err(_) => tracing::warn!(value = delay, "Ignoring invalid {ENV_REFRESH_DELAY_MS}"),
        }
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }
    config
}
