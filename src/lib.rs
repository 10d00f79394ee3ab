// Transect - PTV Visum Network CSV Export Tool
// Copyright (c) 2025 Transect Contributors
// Licensed under the MIT License

//! # Transect - Visum Network CSV Export
//!
//! Transect is a command-line tool that exports network entity data from a
//! PTV Visum transport model to semicolon-delimited CSV files for downstream
//! GIS and analytics workflows.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Connecting** to a Visum automation bridge with cache-invalidation retry
//! - **Extracting** tabular attribute data for nodes, links, zones and stop points
//! - **Transforming** coded attribute values into human-readable labels
//! - **Writing** semicolon-delimited CSV files with stable numeric formatting
//!
//! ## Architecture
//!
//! Transect follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, extract, transform, write)
//! - [`adapters`] - External integrations (Visum automation bridge)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use transect::config::load_config;
//! use transect::core::export::ExportOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("transect.toml")?;
//!
//!     // Connect to the Visum bridge
//!     let orchestrator = ExportOrchestrator::connect(&config).await?;
//!
//!     // Execute export
//!     let summary = orchestrator.execute().await?;
//!
//!     println!("Exported {} rows", summary.total_rows());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Transect uses the [`domain::TransectError`] type for all errors:
//!
//! ```rust,no_run
//! use transect::domain::TransectError;
//!
//! fn example() -> Result<(), TransectError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = transect::config::load_config("transect.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Transect uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting export");
//! warn!(collection = "Links", "No entities found");
//! error!(error = %"timeout", "Export failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
