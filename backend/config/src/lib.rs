//! `ontodash-config`: runtime configuration for the ontodash client.
//!
//! Provides:
//! - Typed config schema (backend location, refresh delay, logging)
//! - YAML read/write with a single backup
//! - `${ENV_VAR}` substitution and `ONTODASH_*` overrides
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config_value, write_config};
pub use schema::{ApiConfig, LoggingConfig, OntodashConfig, RefreshConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, and validate.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<OntodashConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_and_prepare_with(path, &env).await
}

/// [`load_and_prepare`] against an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<OntodashConfig> {
    let config = match load_config_value(path).await? {
        Some(value) => {
            let value = resolve_env_vars_with(&value, env)
                .context("Failed to resolve env vars in config")?;
            serde_json::from_value(value)
                .with_context(|| format!("Invalid config at: {}", path.display()))?
        }
        None => OntodashConfig::default(),
    };

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.into_iter().next() {
        bail!(first);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_env_and_overrides_combine() {
        let dir = std::env::temp_dir().join(format!("ontodash-prepare-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = config_file_path(&dir);
        std::fs::write(&path, "api:\n  host: ${ONTO_HOST}\n  port: 5000\n").unwrap();

        let env: HashMap<String, String> = [
            ("ONTO_HOST".to_string(), "onto.local".to_string()),
            (env::ENV_PORT.to_string(), "5050".to_string()),
        ]
        .into_iter()
        .collect();
        let config = load_and_prepare_with(&path, &env).await.unwrap();

        assert_eq!(config.api_base_url(), "http://onto.local:5050/api");
        assert_eq!(config.log_level(), "info");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn invalid_base_url_fails() {
        let env: HashMap<String, String> =
            [(env::ENV_API_URL.to_string(), "ftp://nope".to_string())]
                .into_iter()
                .collect();
        let missing = std::env::temp_dir().join("ontodash-does-not-exist/config.yaml");
        let err = load_and_prepare_with(&missing, &env).await.unwrap_err();
        assert!(err.to_string().contains("api.baseUrl"));
    }
}
