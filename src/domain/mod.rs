//! Domain models and types for Transect.
//!
//! This module contains the core domain types and business rules for the
//! export pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Network entity types** ([`EntityCollection`], [`AttrValue`], [`RawRow`])
//! - **Error types** ([`TransectError`], [`VisumError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TransectError>`]:
//!
//! ```rust,no_run
//! use transect::domain::Result;
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = transect::config::load_config("transect.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod network;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{TransectError, VisumError};
pub use network::{AttrValue, AttributeSpec, EntityCollection, ExportRow, RawRow};
pub use result::Result;
