//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable or JSON console output
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use carebook::logging::init_logging;
//! use carebook::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the dataset a server or command is working against
///
/// # Example
///
/// ```no_run
/// use carebook::log_store_ready;
///
/// log_store_ready!("json:patient.json", 12);
/// ```
#[macro_export]
macro_rules! log_store_ready {
    ($store:expr, $count:expr) => {
        tracing::info!(
            store = %$store,
            records = $count,
            "Patient store ready"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use carebook::log_error_with_context;
/// use carebook::domain::CarebookError;
///
/// let error = CarebookError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
