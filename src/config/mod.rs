//! Configuration management for Carebook.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Carebook uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CAREBOOK_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Bind address and request body limit
//! - [`StoreConfig`] - Dataset backend and path
//! - [`LoggingConfig`] - Console format and file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [store]
//! backend = "json"
//! path = "${CAREBOOK_DATA_DIR}/patient.json"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use carebook::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("carebook.toml")?;
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, CarebookConfig, LoggingConfig, ServerConfig, StoreBackend, StoreConfig,
};
