//! ontodash configuration schema, typed for serde YAML/JSON.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::defaults::{
    DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_LOG_LEVEL, DEFAULT_REFRESH_DELAY_MS,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntodashConfig {
    /// Backend location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    /// Dashboard refresh after mutations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Full base URL, e.g. `http://localhost:5000/api`. Wins over host/port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Per-request timeout. Unset means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `trace` | `debug` | `info` | `warn` | `error`, or a full filter directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// JSON console output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved accessors
// ---------------------------------------------------------------------------

impl OntodashConfig {
    /// `api.baseUrl`, else `http://{host}:{port}/api`.
    pub fn api_base_url(&self) -> String {
        let api = self.api.as_ref();
        if let Some(url) = api.and_then(|a| a.base_url.as_deref()) {
            return url.trim_end_matches('/').to_string();
        }
        let host = api
            .and_then(|a| a.host.as_deref())
            .unwrap_or(DEFAULT_API_HOST);
        let port = api.and_then(|a| a.port).unwrap_or(DEFAULT_API_PORT);
        format!("http://{host}:{port}/api")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api
            .as_ref()
            .and_then(|a| a.timeout_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn refresh_delay(&self) -> Duration {
        let ms = self
            .refresh
            .as_ref()
            .and_then(|r| r.delay_ms)
            .unwrap_or(DEFAULT_REFRESH_DELAY_MS);
        Duration::from_millis(ms)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .map(PathBuf::from)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}
