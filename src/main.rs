// Carebook - Patient Record Service
// Copyright (c) 2025 Carebook Contributors
// Licensed under the MIT License

use carebook::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use carebook::cli::{Cli, Commands};
use carebook::config::{load_config, CarebookConfig, LoggingConfig};
use carebook::logging::init_logging;
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Only `serve` needs the configuration up front; its logging settings
    // come from the file. Other commands log to the console only.
    let config = match &cli.command {
        Commands::Serve(_) => match load_config(&cli.config) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load configuration {}: {e}", cli.config);
                process::exit(EXIT_CONFIG);
            }
        },
        _ => None,
    };

    let (log_level, logging_config) = match &config {
        Some(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        None => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Carebook - Patient Record Service"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                        }
                        _ = sigterm.recv() => {
                            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to install SIGTERM handler; Ctrl+C only");
                    if tokio::signal::ctrl_c().await.is_err() {
                        return;
                    }
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                }
            }
            let _ = shutdown_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, config, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first.
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: Option<CarebookConfig>,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Serve(args) => {
            let config = config.ok_or_else(|| anyhow::anyhow!("configuration not loaded"))?;
            args.execute(config, shutdown_signal).await
        }
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute(&cli.config).await,
    }
}
