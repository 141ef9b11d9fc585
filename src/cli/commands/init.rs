//! Init command implementation
//!
//! This module implements the `init` command, which writes a starter
//! configuration file and optionally an empty dataset at the store path that
//! configuration names.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::adapters::store::JsonFileStore;
use crate::config::{load_config, StoreBackend};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration file (defaults to the global --config path)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,

    /// Also create an empty dataset at the configured store path
    ///
    /// An existing configuration file is kept and read for the store path.
    #[arg(long)]
    pub with_data: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let path = self.output.as_deref().unwrap_or(config_path);
        tracing::info!(
            output = %path,
            with_data = self.with_data,
            "Initializing configuration file"
        );

        println!("📝 Initializing Carebook configuration");
        println!();

        if Path::new(path).exists() && !self.force {
            if !self.with_data {
                println!("❌ Configuration file already exists: {path}");
                println!("   Use --force to overwrite, or --with-data to only create the dataset");
                return Ok(EXIT_CONFIG);
            }
            println!("ℹ️  Keeping existing configuration file: {path}");
        } else {
            if let Err(e) = fs::write(path, Self::generate_config()) {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_FATAL);
            }
            println!("✅ Configuration file created: {path}");
        }

        if self.with_data {
            let code = Self::create_dataset(path).await;
            if code != EXIT_OK {
                return Ok(code);
            }
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {path} with your settings");
        println!("  2. Validate configuration: carebook validate-config");
        println!("  3. Start the API: carebook serve");
        println!();
        Ok(EXIT_OK)
    }

    /// Creates an empty dataset where the configuration at `path` points
    async fn create_dataset(path: &str) -> i32 {
        let config = match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Cannot read store settings from {path}");
                println!("   Error: {e}");
                return EXIT_CONFIG;
            }
        };

        if config.store.backend == StoreBackend::Memory {
            println!("ℹ️  Store backend is memory; no dataset file needed");
            return EXIT_OK;
        }

        let store = JsonFileStore::new(&config.store.path);
        match store.initialize().await {
            Ok(true) => println!("✅ Empty dataset created: {}", store.path().display()),
            Ok(false) => println!("ℹ️  Dataset already exists: {}", store.path().display()),
            Err(e) => {
                println!("❌ Failed to create dataset");
                println!("   Error: {e}");
                return EXIT_FATAL;
            }
        }
        EXIT_OK
    }

    /// Starter configuration with every setting at its default
    fn generate_config() -> String {
        r#"# Carebook Configuration File
# Patient record service
#
# Values may reference environment variables as ${VAR_NAME}.
# Any setting can also be overridden with CAREBOOK_<SECTION>_<KEY>,
# for example CAREBOOK_SERVER_PORT=9000.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[server]
host = "127.0.0.1"
port = 8000

# Largest accepted request body in bytes
body_limit_bytes = 1048576

[store]
# json: one JSON file holding every record
# memory: records live in the process and are lost on exit
backend = "json"
path = "patient.json"

[logging]
# Console output as JSON instead of human-readable lines
json_console = false

# Local JSON log files
local_enabled = false
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
