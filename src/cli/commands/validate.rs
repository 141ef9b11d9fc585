//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Carebook configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, StoreBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen Address: {}:{}", config.server.host, config.server.port);
        println!("  Body Limit: {} bytes", config.server.body_limit_bytes);
        match config.store.backend {
            StoreBackend::Json => println!("  Store: JSON file at {}", config.store.path),
            StoreBackend::Memory => println!("  Store: in-memory (not persisted)"),
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();

        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config_exits_zero() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
    }

    #[tokio::test]
    async fn test_invalid_config_exits_two() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[store]\nbackend = \"sqlite\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_missing_config_exits_two() {
        let code = ValidateArgs {}
            .execute("/nonexistent/carebook.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
