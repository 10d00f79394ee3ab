//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Transect configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bridge URL: {}", config.visum.bridge_url);
        println!("  Application ID: {}", config.visum.application_id);
        println!("  Model Path: {}", config.visum.model_path);
        println!("  Request Timeout: {}s", config.visum.timeout_seconds);
        println!("  Output Directory: {}", config.export.output_dir);
        println!(
            "  Collections: {}",
            if config.export.collections.is_empty() {
                "all".to_string()
            } else {
                config.export.collections.join(", ")
            }
        );
        println!(
            "  Inter-export Delay: {}s",
            config.export.inter_export_delay_secs
        );
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_config_returns_config_error_code() {
        let args = ValidateArgs {};
        let code = args.execute("definitely-missing.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
