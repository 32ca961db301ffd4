//! Composition root: config, logging, gateway and refresh bus.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use tracing::{info, warn};

use logging::{init_logger, LogOptions, LoggerGuard};
use ontodash_client::HttpGateway;
use ontodash_config::{config_dir, config_file_path, load_and_prepare, validate, OntodashConfig};
use ontodash_core::{OntologyApi, RefreshBus};

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub config: OntodashConfig,
    pub config_path: PathBuf,
    pub api: Arc<dyn OntologyApi>,
    pub bus: RefreshBus,
    pub base_url: String,
    _logger: LoggerGuard,
}

impl AppContext {
    /// `interactive` routes logs to a file only, since the terminal UI owns
    /// the screen.
    pub async fn build(
        config_path: Option<&Path>,
        api_url: Option<&str>,
        interactive: bool,
    ) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config_file_path(&config_dir()));
        let config = load_and_prepare(&config_path)
            .await
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let logger = init_logger(&log_options(&config, interactive))?;
        // Loading ran before the subscriber existed; repeat its warnings.
        for warning in validate(&config).warnings {
            warn!(path = %warning.path, message = %warning.message, "Config warning");
        }

        let base_url = api_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| config.api_base_url());
        let gateway = HttpGateway::with_timeout(base_url.clone(), config.request_timeout())
            .context("Failed to build HTTP client")?;
        info!(
            base_url = %base_url,
            config = %config_path.display(),
            "ontodash starting"
        );

        Ok(Self {
            config,
            config_path,
            api: Arc::new(gateway),
            bus: RefreshBus::new(),
            base_url,
            _logger: logger,
        })
    }

    pub fn refresh_delay(&self) -> Duration {
        self.config.refresh_delay()
    }
}

fn log_options(config: &OntodashConfig, interactive: bool) -> LogOptions {
    let dir = match config.log_dir() {
        Some(dir) => Some(dir),
        None if interactive => Some(config_dir().join("logs")),
        None => None,
    };
    LogOptions {
        level: config.log_level(),
        dir,
        json: config.log_json(),
        console: !interactive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontodash_config::LoggingConfig;

    #[test]
    fn interactive_mode_logs_to_file_only() {
        let options = log_options(&OntodashConfig::default(), true);
        assert!(!options.console);
        assert!(options.dir.is_some_and(|d| d.ends_with("logs")));
    }

    #[test]
    fn batch_mode_uses_console_and_configured_dir() {
        let config = OntodashConfig {
            logging: Some(LoggingConfig {
                dir: Some("/var/log/ontodash".into()),
                level: Some("debug".into()),
                json: Some(true),
            }),
            ..Default::default()
        };
        let options = log_options(&config, false);
        assert!(options.console);
        assert!(options.json);
        assert_eq!(options.level, "debug");
        assert_eq!(options.dir, Some(PathBuf::from("/var/log/ontodash")));
    }
}
