//! Configuration schema types
//!
//! This module defines the configuration structure for Carebook. Every section
//! has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Dataset backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Single JSON document on disk
    #[default]
    Json,
    /// Process memory, lost on exit
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(StoreBackend::Json),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "Invalid store backend '{other}'. Must be one of: json, memory"
            )),
        }
    }
}

/// Main Carebook configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarebookConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Dataset settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CarebookConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.store.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        if self.body_limit_bytes == 0 {
            return Err("server.body_limit_bytes must be > 0".to_string());
        }
        self.addr()?;
        Ok(())
    }

    /// Socket address built from host and port
    pub fn addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid server address '{}:{}': {}", self.host, self.port, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (json or memory)
    #[serde(default)]
    pub backend: StoreBackend,

    /// Dataset file path (json backend)
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StoreBackend::Json && self.path.trim().is_empty() {
            return Err("store.path cannot be empty when backend is 'json'".to_string());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON instead of human-readable text
    #[serde(default)]
    pub json_console: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json_console: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

fn default_store_path() -> String {
    "patient.json".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CarebookConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.store.backend, StoreBackend::Json);
        assert_eq!(config.store.path, "patient.json");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: CarebookConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.body_limit_bytes, 1024 * 1024);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = CarebookConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("log_level"));
    }

    #[test]
    fn test_invalid_port() {
        let mut config = CarebookConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_host() {
        let mut config = CarebookConfig::default();
        config.server.host = "not a host".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid server address"));
    }

    #[test]
    fn test_json_backend_requires_path() {
        let mut config = CarebookConfig::default();
        config.store.path = "  ".to_string();
        assert!(config.validate().is_err());

        config.store.backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = CarebookConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("JSON".parse::<StoreBackend>().unwrap(), StoreBackend::Json);
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }
}
