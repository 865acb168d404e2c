//! Logging and tracing infrastructure for Querydesk
//!
//! Built on the `tracing` crate. Supports pretty console output for
//! development, JSON file output for bug reports, and environment-based
//! configuration via RUST_LOG. The embedding shell calls [`init`] once at
//! startup.

use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files should be written
    pub log_dir: PathBuf,

    /// Whether to enable JSON output to files (for bug reports)
    pub enable_json_logs: bool,

    /// Whether to enable pretty console output
    pub enable_console_logs: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Default log level filter
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let log_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("querydesk")
            .join("logs");

        Self {
            log_dir,
            enable_json_logs: true,
            enable_console_logs: true,
            include_location: cfg!(debug_assertions),
            default_filter: "info,querydesk_core=debug,querydesk_driver_sqlite=debug,querydesk_query=debug"
                .to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create a testing configuration (console only, no files)
    pub fn testing() -> Self {
        Self {
            log_dir: std::env::temp_dir().join("querydesk-tests"),
            enable_json_logs: false,
            enable_console_logs: true,
            include_location: true,
            default_filter: "debug".to_string(),
        }
    }
}

/// Initialize the logging system with the given configuration
///
/// # Panics
/// Panics if logging has already been initialized
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;

    // RUST_LOG takes precedence over the configured default filter. EnvFilter
    // is not Clone, so each layer builds its own.
    let env_filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.default_filter))
    };

    let mut layers = Vec::new();

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_ansi(true)
            .pretty()
            .with_filter(env_filter())
            .boxed();

        layers.push(console_layer);
    }

    if config.enable_json_logs {
        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "querydesk.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The writer guard must live for the duration of the program
        std::mem::forget(guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .json()
            .with_writer(non_blocking)
            .with_filter(env_filter())
            .boxed();

        layers.push(json_layer);
    }

    tracing_subscriber::registry().with(layers).init();

    tracing::info!(
        log_dir = %config.log_dir.display(),
        json_enabled = config.enable_json_logs,
        console_enabled = config.enable_console_logs,
        "logging system initialized"
    );

    Ok(())
}
