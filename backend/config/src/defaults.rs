//! Config defaults: applies default values to a parsed config.

use crate::schema::{ApiConfig, LoggingConfig, OntodashConfig, RefreshConfig};

pub const DEFAULT_API_HOST: &str = "localhost";

pub const DEFAULT_API_PORT: u16 = 5000;

/// Delay before the dashboard reloads after a mutation.
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 500;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: OntodashConfig) -> OntodashConfig {
    let config = apply_api_defaults(config);
    let config = apply_refresh_defaults(config);
    apply_logging_defaults(config)
}

/// Fill host and port unless an explicit base URL is configured.
fn apply_api_defaults(mut config: OntodashConfig) -> OntodashConfig {
    let api = config.api.get_or_insert_with(ApiConfig::default);
    if api.base_url.is_none() {
        api.host.get_or_insert_with(|| DEFAULT_API_HOST.to_string());
        api.port.get_or_insert(DEFAULT_API_PORT);
    }
    config
}

fn apply_refresh_defaults(mut config: OntodashConfig) -> OntodashConfig {
    let refresh = config.refresh.get_or_insert_with(RefreshConfig::default);
    refresh.delay_ms.get_or_insert(DEFAULT_REFRESH_DELAY_MS);
    config
}

fn apply_logging_defaults(mut config: OntodashConfig) -> OntodashConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let config = apply_all_defaults(OntodashConfig::default());
        let api = config.api.unwrap();
        assert_eq!(api.host.as_deref(), Some("localhost"));
        assert_eq!(api.port, Some(5000));
        assert_eq!(config.refresh.unwrap().delay_ms, Some(500));
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn base_url_suppresses_host_defaults() {
        let config = OntodashConfig {
            api: Some(ApiConfig {
                base_url: Some("http://x/api".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let api = apply_all_defaults(config).api.unwrap();
        assert!(api.host.is_none());
        assert!(api.port.is_none());
    }

    #[test]
    fn keeps_explicit_values() {
        let config = OntodashConfig {
            refresh: Some(RefreshConfig { delay_ms: Some(0) }),
            ..Default::default()
        };
        assert_eq!(apply_all_defaults(config).refresh.unwrap().delay_ms, Some(0));
    }
}
