//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TransectConfig;
use crate::domain::{Result, TransectError};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TransectConfig
/// 4. Applies environment variable overrides (TRANSECT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is missing, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<TransectConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TransectError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TransectError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TransectConfig = toml::from_str(&contents)
        .map_err(|e| TransectError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        TransectError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TransectError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TRANSECT_* prefix
///
/// Variables follow the pattern TRANSECT_<SECTION>_<KEY>, e.g.
/// TRANSECT_VISUM_BRIDGE_URL or TRANSECT_EXPORT_OUTPUT_DIR.
fn apply_env_overrides(config: &mut TransectConfig) {
    if let Ok(val) = std::env::var("TRANSECT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("TRANSECT_VISUM_BRIDGE_URL") {
        config.visum.bridge_url = val;
    }
    if let Ok(val) = std::env::var("TRANSECT_VISUM_APPLICATION_ID") {
        config.visum.application_id = val;
    }
    if let Ok(val) = std::env::var("TRANSECT_VISUM_MODEL_PATH") {
        config.visum.model_path = val;
    }
    if let Ok(val) = std::env::var("TRANSECT_VISUM_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.visum.timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("TRANSECT_VISUM_CACHE_DIR") {
        config.visum.cache_dir = Some(val);
    }

    if let Ok(val) = std::env::var("TRANSECT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("TRANSECT_EXPORT_INTER_EXPORT_DELAY_SECS") {
        if let Ok(secs) = val.parse() {
            config.export.inter_export_delay_secs = secs;
        }
    }

    if let Ok(val) = std::env::var("TRANSECT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRANSECT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
