//! Structured logging setup using tracing
//!
//! Console output is always on, human-readable by default or JSON when
//! `json_console` is set. File output is JSON with daily or hourly rotation.
//!
//! # Example
//!
//! ```no_run
//! use carebook::logging::init_logging;
//! use carebook::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! // Keep _guard alive for the duration of the program
//! ```

use crate::config::LoggingConfig;
use crate::domain::{CarebookError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log file name inside `local_path`
pub const LOG_FILE_NAME: &str = "carebook.log";

/// Keeps the file writer alive; logs are flushed when this is dropped
pub struct LoggingGuard {
    file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self { file_guard }
    }

    /// Whether file logging is active
    pub fn has_file_writer(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `log_level_str` when set.
///
/// # Errors
///
/// `Configuration` for an unknown level, an unusable log directory, or a
/// subscriber that was already installed.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "carebook={level},tower_http={level}",
            level = log_level
        ))
    });

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = if config.json_console {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter.clone())
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(env_filter.clone())
            .boxed()
    };
    layers.push(console_layer);

    let file_guard = if config.local_enabled {
        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            CarebookError::Configuration(format!(
                "Failed to create log directory {}: {}",
                config.local_path, e
            ))
        })?;

        let file_appender = RollingFileAppender::new(
            parse_rotation(&config.local_rotation),
            &config.local_path,
            LOG_FILE_NAME,
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();

        layers.push(file_layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| {
            CarebookError::Configuration(format!("Failed to install log subscriber: {e}"))
        })?;

    tracing::info!(
        level = %log_level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        json_console = config.json_console,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(CarebookError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}
