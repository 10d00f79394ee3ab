//! Export command implementation
//!
//! This module implements the `export` command for exporting network data
//! from Visum to CSV files.

use crate::config::load_config;
use crate::core::export::summary::KindOutcome;
use crate::core::export::ExportOrchestrator;
use crate::domain::{TransectError, VisumError};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the model version file path
    #[arg(long)]
    pub model: Option<String>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the collections to export (comma-separated:
    /// nodes,links,zones,stop-points)
    #[arg(long)]
    pub collection: Option<String>,

    /// Override the delay between kind exports, in seconds
    #[arg(long)]
    pub delay_secs: Option<u64>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(model) = &self.model {
            tracing::info!(model = %model, "Overriding model path from CLI");
            config.visum.model_path = model.clone();
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }

        if let Some(collections) = &self.collection {
            let names: Vec<String> = collections
                .split(',')
                .map(|s| s.trim().to_string())
                .collect();
            tracing::info!(collections = ?names, "Overriding collections from CLI");
            config.export.collections = names;
        }

        if let Some(delay) = self.delay_secs {
            tracing::info!(delay_secs = delay, "Overriding inter-export delay from CLI");
            config.export.inter_export_delay_secs = delay;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Bridge: {}", config.visum.bridge_url);
            println!("  Model: {}", config.visum.model_path);
            println!("  Output directory: {}", config.export.output_dir);
            println!(
                "  Collections: {}",
                if config.export.collections.is_empty() {
                    "all".to_string()
                } else {
                    config.export.collections.join(", ")
                }
            );
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        // Fatal gate 1: connection
        tracing::info!("Connecting to Visum bridge");
        let orchestrator = match ExportOrchestrator::connect(&config).await {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to Visum");
                eprintln!("Failed to connect to Visum: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        // Fatal gate 2 (model load) plus the per-kind cycles
        println!("🚀 Starting export...");
        println!();

        let summary = match orchestrator.execute().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                let code = match e {
                    TransectError::Visum(VisumError::DispatchFailed(_)) => 4,
                    _ => 5, // Fatal error exit code
                };
                return Ok(code);
            }
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        for kind in &summary.kinds {
            match &kind.outcome {
                KindOutcome::Exported {
                    rows,
                    dropped_rows,
                    path,
                } => {
                    if *dropped_rows > 0 {
                        println!(
                            "  {}: {} rows -> {} ({} malformed rows dropped)",
                            kind.collection,
                            rows,
                            path.display(),
                            dropped_rows
                        );
                    } else {
                        println!("  {}: {} rows -> {}", kind.collection, rows, path.display());
                    }
                }
                KindOutcome::Empty => {
                    println!("  {}: no entities, no file produced", kind.collection);
                }
                KindOutcome::Failed { message } => {
                    println!("  {}: FAILED - {}", kind.collection, message);
                }
            }
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        let exit_code = if summary.is_complete_success() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}
