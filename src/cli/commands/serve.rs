//! Serve command implementation
//!
//! Builds the store and record service from configuration and runs the HTTP
//! API until a shutdown signal arrives.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::adapters::store::create_store;
use crate::api::{build_app, CarebookServer};
use crate::config::CarebookConfig;
use crate::core::records::PatientService;
use crate::{log_error_with_context, log_store_ready};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        mut config: CarebookConfig,
        shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        let addr = match config.server.addr() {
            Ok(addr) => addr,
            Err(e) => {
                log_error_with_context!(&e, "Invalid listen address");
                eprintln!("❌ Invalid listen address: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let store = create_store(&config.store);
        let service = Arc::new(PatientService::new(store));

        // The dataset must be readable before accepting traffic.
        match service.list().await {
            Ok(collection) => {
                log_store_ready!(service.store_description(), collection.len());
            }
            Err(e) => {
                log_error_with_context!(&e, "Patient store is not usable");
                eprintln!(
                    "❌ Cannot read patient store {}: {e}",
                    service.store_description()
                );
                eprintln!("   Run `carebook init --with-data` to create an empty dataset");
                return Ok(EXIT_FATAL);
            }
        }

        let app = build_app(service, &config.server);
        let server = CarebookServer::new(addr, app);

        println!("🩺 Carebook listening on http://{}", server.addr());

        if let Err(e) = server.run(shutdown).await {
            log_error_with_context!(&e, "Server terminated");
            eprintln!("❌ Server error: {e}");
            return Ok(EXIT_FATAL);
        }

        Ok(EXIT_OK)
    }
}
