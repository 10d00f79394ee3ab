//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "transect.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Transect configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set visum.model_path to your .ver file");
                println!("  3. Validate configuration: transect validate-config");
                println!("  4. Run export: transect export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Starter configuration content
    fn starter_config() -> &'static str {
        r#"# Transect Configuration File
# Visum network export tool

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[visum]
# Base URL of the Visum automation bridge
bridge_url = "http://localhost:7225"

# COM program identifier dispatched on the bridge side
application_id = "Visum.Visum"

# Path to the model version file, as seen by the Visum host
model_path = "C:\\models\\network.ver"

# Request timeout for every bridge call, in seconds
timeout_seconds = 300

# Fixed delay between the two connection attempts, in milliseconds
connect_retry_delay_ms = 2000

[export]
# Directory receiving the CSV files
output_dir = "."

# Delay after each successful kind export, in seconds
inter_export_delay_secs = 5

# Subset of collections to export; empty selects all four
# collections = ["nodes", "links", "zones", "stop-points"]

[logging]
# Enable rotating JSON log files in addition to console output
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_parseable_config() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("transect.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        let code = args.execute().await.unwrap();
        assert_eq!(code, 0);

        let contents = fs::read_to_string(&output).unwrap();
        let config: crate::config::TransectConfig = toml::from_str(&contents).unwrap();
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("transect.toml");
        fs::write(&output, "existing = true").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        let code = args.execute().await.unwrap();
        assert_eq!(code, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing = true");
    }
}
