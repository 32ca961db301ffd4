//! Structured Logger
//!
//! Wraps `tracing` to provide console output, daily-rotated NDJSON files,
//! and environment-based level control.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where and how to log.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for `ontodash.YYYY-MM-DD.log` files. `None` disables file output.
    pub dir: Option<PathBuf>,
    /// Emit console lines as JSON instead of human-readable text.
    pub json: bool,
    /// Console output on stderr. Off while the terminal UI owns the screen.
    pub console: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
            console: true,
        }
    }
}

/// Keeps the non-blocking file writer flushing. Hold it for the life of
/// the process.
#[must_use]
pub struct LoggerGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the global structured logger.
///
/// Calling it twice is harmless: the second registry is discarded.
pub fn init_logger(options: &LogOptions) -> Result<LoggerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    let (file_layer, file_guard) = match &options.dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("ontodash")
                .filename_suffix("log")
                .build(dir)
                .with_context(|| format!("Failed to open log directory: {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_text = (options.console && !options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });
    let console_json = (options.console && options.json)
        .then(|| fmt::layer().json().with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_text)
        .with(console_json)
        .with(file_layer)
        .try_init();

    Ok(LoggerGuard { _file: file_guard })
}
