//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CarebookConfig;
use crate::domain::errors::CarebookError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CarebookConfig
/// 4. Applies environment variable overrides (CAREBOOK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `Configuration` if the file is missing or unreadable, a referenced
/// environment variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use carebook::config::loader::load_config;
///
/// let config = load_config("carebook.toml").expect("Failed to load config");
/// println!("Dataset: {}", config.store.path);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CarebookConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CarebookError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CarebookError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn load_config_from_str(contents: &str) -> Result<CarebookConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CarebookConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CarebookError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported in
/// a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CarebookError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CarebookError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CAREBOOK_* prefix
///
/// Environment variables follow the pattern: CAREBOOK_<SECTION>_<KEY>
/// For example: CAREBOOK_SERVER_PORT, CAREBOOK_STORE_PATH
///
/// A value that does not parse as its setting's type is an error. String
/// settings are checked by [`CarebookConfig::validate`] afterwards.
fn apply_env_overrides(config: &mut CarebookConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("CAREBOOK_APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }

    // Server overrides
    if let Some(val) = env_override("CAREBOOK_SERVER_HOST")? {
        config.server.host = val;
    }
    if let Some(val) = env_override("CAREBOOK_SERVER_PORT")? {
        config.server.port = val;
    }
    if let Some(val) = env_override("CAREBOOK_SERVER_BODY_LIMIT_BYTES")? {
        config.server.body_limit_bytes = val;
    }

    // Store overrides
    if let Some(val) = env_override("CAREBOOK_STORE_BACKEND")? {
        config.store.backend = val;
    }
    if let Some(val) = env_override("CAREBOOK_STORE_PATH")? {
        config.store.path = val;
    }

    // Logging overrides
    if let Some(val) = env_override("CAREBOOK_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("CAREBOOK_LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("CAREBOOK_LOGGING_LOCAL_ROTATION")? {
        config.logging.local_rotation = val;
    }
    if let Some(val) = env_override("CAREBOOK_LOGGING_JSON_CONSOLE")? {
        config.logging.json_console = val;
    }

    Ok(())
}

/// Reads `name` and parses it as `T`; `None` when the variable is unset
fn env_override<T: FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) => val
            .parse()
            .map(Some)
            .map_err(|_| CarebookError::Configuration(format!("Invalid {name} '{val}'"))),
        Err(_) => Ok(None),
    }
}
