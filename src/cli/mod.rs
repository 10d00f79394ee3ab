//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Transect using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Transect - Visum network export tool
#[derive(Parser, Debug)]
#[command(name = "transect")]
#[command(version, about, long_about = None)]
#[command(author = "Transect Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "transect.toml", env = "TRANSECT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRANSECT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export network data from Visum to CSV files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["transect", "export"]);
        assert_eq!(cli.config, "transect.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["transect", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["transect", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["transect", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["transect", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_export_with_overrides() {
        let cli = Cli::parse_from([
            "transect",
            "export",
            "--model",
            "/models/city.ver",
            "--collection",
            "nodes,links",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.model, Some("/models/city.ver".to_string()));
                assert_eq!(args.collection, Some("nodes,links".to_string()));
            }
            _ => panic!("expected export command"),
        }
    }
}
