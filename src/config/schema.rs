//! Configuration schema
//!
//! TOML-backed configuration with serde defaults and validation.

use crate::domain::{Result, TransectError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Top-level Transect configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransectConfig {
    /// Application-wide settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Visum bridge connection settings
    #[serde(default)]
    pub visum: VisumConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TransectConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.visum.bridge_url.trim().is_empty() {
            return Err(TransectError::Configuration(
                "visum.bridge_url must not be empty".to_string(),
            ));
        }
        if !self.visum.bridge_url.starts_with("http://")
            && !self.visum.bridge_url.starts_with("https://")
        {
            return Err(TransectError::Configuration(format!(
                "visum.bridge_url must be an http(s) URL, got: {}",
                self.visum.bridge_url
            )));
        }
        if self.visum.model_path.trim().is_empty() {
            return Err(TransectError::Configuration(
                "visum.model_path must not be empty".to_string(),
            ));
        }
        if self.visum.timeout_seconds == 0 {
            return Err(TransectError::Configuration(
                "visum.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        for name in &self.export.collections {
            crate::domain::EntityCollection::from_str(name)
                .map_err(TransectError::Configuration)?;
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.to_lowercase().as_str()) {
            return Err(TransectError::Configuration(format!(
                "application.log_level must be one of {valid_levels:?}, got: {}",
                self.application.log_level
            )));
        }

        Ok(())
    }
}

/// Application-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in logs
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// Visum bridge connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisumConfig {
    /// Base URL of the automation bridge
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,

    /// COM program identifier dispatched on the bridge side
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Path to the model version file, as seen by the Visum host
    #[serde(default)]
    pub model_path: String,

    /// Request timeout for every bridge call, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Fixed delay between the two connection attempts, in milliseconds
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,

    /// Interop manifest cache directory; system temp dir when unset
    #[serde(default)]
    pub cache_dir: Option<String>,
}

impl Default for VisumConfig {
    fn default() -> Self {
        Self {
            bridge_url: default_bridge_url(),
            application_id: default_application_id(),
            model_path: String::new(),
            timeout_seconds: default_timeout_seconds(),
            connect_retry_delay_ms: default_connect_retry_delay_ms(),
            cache_dir: None,
        }
    }
}

/// Export pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving the CSV files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Delay after each successful kind export, in seconds
    #[serde(default = "default_inter_export_delay_secs")]
    pub inter_export_delay_secs: u64,

    /// Subset of collections to export; empty selects all four
    #[serde(default)]
    pub collections: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            inter_export_delay_secs: default_inter_export_delay_secs(),
            collections: Vec::new(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rotating JSON log files in addition to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_app_name() -> String {
    "transect".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bridge_url() -> String {
    "http://localhost:7225".to_string()
}

fn default_application_id() -> String {
    "Visum.Visum".to_string()
}

fn default_timeout_seconds() -> u64 {
    300
}

fn default_connect_retry_delay_ms() -> u64 {
    2000
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_inter_export_delay_secs() -> u64 {
    5
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> TransectConfig {
        TransectConfig {
            visum: VisumConfig {
                model_path: "/models/city.ver".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = TransectConfig::default();
        assert_eq!(config.application.name, "transect");
        assert_eq!(config.visum.application_id, "Visum.Visum");
        assert_eq!(config.visum.connect_retry_delay_ms, 2000);
        assert_eq!(config.export.inter_export_delay_secs, 5);
        assert!(config.export.collections.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_model_path() {
        let config = TransectConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_bridge_url() {
        let mut config = valid_config();
        config.visum.bridge_url = "visum://local".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = valid_config();
        config.visum.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_collection() {
        let mut config = valid_config();
        config.export.collections = vec!["nodes".to_string(), "junctions".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = valid_config();
        config.application.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[visum]
bridge_url = "http://10.0.0.5:7225"
model_path = "C:\\models\\lueneburg.ver"
"#;
        let config: TransectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.visum.bridge_url, "http://10.0.0.5:7225");
        assert_eq!(config.export.inter_export_delay_secs, 5);
        assert!(config.validate().is_ok());
    }
}
