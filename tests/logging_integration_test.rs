//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so the
//! initialization checks share a single test.

use carebook::config::LoggingConfig;
use carebook::logging::init_logging;
use carebook::logging::structured::LOG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json_console);
}

#[test]
fn test_file_logging_and_single_initialization() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("nested").join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "hourly".to_string(),
        json_console: false,
    };

    assert!(init_logging("verbose", &config).is_err());

    let guard = init_logging("info", &config).unwrap();
    assert!(guard.has_file_writer());
    assert!(log_path.is_dir());

    carebook::log_store_ready!("memory", 0);
    tracing::info!(patient_id = "P001", "Created patient");
    drop(guard);

    let files: Vec<String> = std::fs::read_dir(&log_path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert!(
        files.iter().any(|name| name.starts_with(LOG_FILE_NAME)),
        "files: {files:?}"
    );

    let second = init_logging("info", &LoggingConfig::default());
    assert!(second.is_err());
}
