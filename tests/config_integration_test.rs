//! Integration tests for configuration loading and validation
//!
//! Every test holds `ENV_MUTEX` because overrides are read from the process
//! environment.

use carebook::config::{load_config, StoreBackend};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that read or modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("CAREBOOK_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CAREBOOK_SERVER_HOST");
    std::env::remove_var("CAREBOOK_SERVER_PORT");
    std::env::remove_var("CAREBOOK_SERVER_BODY_LIMIT_BYTES");
    std::env::remove_var("CAREBOOK_STORE_BACKEND");
    std::env::remove_var("CAREBOOK_STORE_PATH");
    std::env::remove_var("CAREBOOK_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("CAREBOOK_LOGGING_LOCAL_PATH");
    std::env::remove_var("CAREBOOK_LOGGING_LOCAL_ROTATION");
    std::env::remove_var("CAREBOOK_LOGGING_JSON_CONSOLE");
    std::env::remove_var("TEST_CAREBOOK_DATA_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9000
body_limit_bytes = 65536

[store]
backend = "json"
path = "/var/lib/carebook/patient.json"

[logging]
local_enabled = true
local_path = "/tmp/carebook-logs"
local_rotation = "hourly"
json_console = true
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.body_limit_bytes, 65536);
    assert_eq!(config.store.backend, StoreBackend::Json);
    assert_eq!(config.store.path, "/var/lib/carebook/patient.json");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
    assert!(config.logging.json_console);
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("# nothing set\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.body_limit_bytes, 1024 * 1024);
    assert_eq!(config.store.backend, StoreBackend::Json);
    assert_eq!(config.store.path, "patient.json");
    assert!(!config.logging.local_enabled);
    assert!(!config.logging.json_console);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CAREBOOK_DATA_DIR", "/srv/data");

    let file = write_config(
        r#"
[store]
path = "${TEST_CAREBOOK_DATA_DIR}/patient.json"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.store.path, "/srv/data/patient.json");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[store]
path = "${TEST_CAREBOOK_DATA_DIR}/patient.json"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_CAREBOOK_DATA_DIR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[server]
port = 8000

[store]
backend = "json"
path = "patient.json"
"#,
    );

    std::env::set_var("CAREBOOK_SERVER_PORT", "9100");
    std::env::set_var("CAREBOOK_STORE_BACKEND", "memory");
    std::env::set_var("CAREBOOK_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("CAREBOOK_LOGGING_JSON_CONSOLE", "true");

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(config.application.log_level, "warn");
    assert!(config.logging.json_console);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    std::env::set_var("CAREBOOK_SERVER_PORT", "eighty");
    assert!(load_config(file.path()).is_err());
    cleanup_env_vars();

    std::env::set_var("CAREBOOK_STORE_BACKEND", "sqlite");
    assert!(load_config(file.path()).is_err());
    cleanup_env_vars();

    for (name, value) in [
        ("CAREBOOK_SERVER_BODY_LIMIT_BYTES", "1MB"),
        ("CAREBOOK_LOGGING_LOCAL_ENABLED", "yes"),
        ("CAREBOOK_LOGGING_JSON_CONSOLE", "1"),
        ("CAREBOOK_LOGGING_LOCAL_ROTATION", "weekly"),
    ] {
        std::env::set_var(name, value);
        let err = load_config(file.path()).unwrap_err();
        assert_eq!(err.kind(), "configuration_error", "{name}={value}");
        cleanup_env_vars();
    }
}

#[test]
fn test_typed_and_rotation_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    std::env::set_var("CAREBOOK_SERVER_BODY_LIMIT_BYTES", "2048");
    std::env::set_var("CAREBOOK_LOGGING_LOCAL_ENABLED", "true");
    std::env::set_var("CAREBOOK_LOGGING_LOCAL_ROTATION", "hourly");

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.server.body_limit_bytes, 2048);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        "[application]\nlog_level = \"verbose\"\n",
        "[server]\nport = 0\n",
        "[store]\nbackend = \"json\"\npath = \"  \"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];
    for contents in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert_eq!(err.kind(), "configuration_error", "case: {contents}");
    }
}

#[test]
fn test_missing_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let err = load_config("/nonexistent/carebook.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
