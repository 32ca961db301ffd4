//! Config validation with user-friendly error messages.

use crate::schema::OntodashConfig;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Refresh delays above this are probably a unit mistake (seconds vs ms).
const MAX_SENSIBLE_REFRESH_DELAY_MS: u64 = 10_000;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &OntodashConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_api(config, &mut report);
    validate_refresh(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_api(config: &OntodashConfig, report: &mut ValidationReport) {
    let Some(api) = &config.api else { return };
    if let Some(url) = &api.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("api.baseUrl", format!("'{url}' must start with http:// or https://"));
        }
    }
    if let Some(host) = &api.host {
        if host.trim().is_empty() {
            report.error("api.host", "Host cannot be empty");
        }
    }
    if api.port == Some(0) {
        report.error("api.port", "Port 0 is not a valid backend port");
    }
    if api.timeout_ms == Some(0) {
        report.warn("api.timeoutMs", "0 disables the request timeout");
    }
}

fn validate_refresh(config: &OntodashConfig, report: &mut ValidationReport) {
    let Some(delay) = config.refresh.as_ref().and_then(|r| r.delay_ms) else {
        return;
    };
    if delay > MAX_SENSIBLE_REFRESH_DELAY_MS {
        report.warn(
            "refresh.delayMs",
            format!("{delay}ms is unusually long; the value is in milliseconds"),
        );
    }
}

fn validate_logging(config: &OntodashConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    // Full filter directives (`views=debug,info`) are passed through as-is.
    if !level.contains('=') && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown level '{level}'"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ApiConfig, LoggingConfig, RefreshConfig};

    #[test]
    fn default_config_is_valid() {
        let report = validate(&crate::apply_all_defaults(OntodashConfig::default()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = OntodashConfig {
            api: Some(ApiConfig {
                base_url: Some("localhost:5000/api".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "api.baseUrl");
    }

    #[test]
    fn warns_on_odd_values() {
        let config = OntodashConfig {
            refresh: Some(RefreshConfig {
                delay_ms: Some(60_000),
            }),
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn accepts_filter_directives() {
        let config = OntodashConfig {
            logging: Some(LoggingConfig {
                level: Some("ontodash_views=debug,info".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate(&config).warnings.is_empty());
    }
}
