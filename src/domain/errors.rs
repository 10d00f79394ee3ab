//! Domain error types
//!
//! This module defines the error hierarchy for Transect. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Transect error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TransectError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Visum bridge errors (connection, model load, attribute queries)
    #[error("Visum error: {0}")]
    Visum(#[from] VisumError),

    /// CSV output errors
    #[error("Write error: {0}")]
    Write(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Visum bridge-specific errors
///
/// Errors that occur when talking to the Visum automation bridge.
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum VisumError {
    /// Failed to dispatch a session to the Visum instance
    #[error("Failed to dispatch Visum session: {0}")]
    DispatchFailed(String),

    /// The model version file could not be loaded
    #[error("Failed to load model version: {0}")]
    LoadFailed(String),

    /// An attribute query against a network collection failed
    #[error("Attribute query failed for {collection}: {message}")]
    AttributeQueryFailed { collection: String, message: String },

    /// The bridge returned a response we could not interpret
    #[error("Invalid response from bridge: {0}")]
    InvalidResponse(String),

    /// The session is no longer valid on the bridge side
    #[error("Visum session expired: {0}")]
    SessionExpired(String),

    /// An external call exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TransectError {
    fn from(err: std::io::Error) -> Self {
        TransectError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TransectError {
    fn from(err: serde_json::Error) -> Self {
        TransectError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TransectError {
    fn from(err: toml::de::Error) -> Self {
        TransectError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for TransectError {
    fn from(err: csv::Error) -> Self {
        TransectError::Write(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transect_error_display() {
        let err = TransectError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_visum_error_conversion() {
        let visum_err = VisumError::DispatchFailed("bridge unreachable".to_string());
        let err: TransectError = visum_err.into();
        assert!(matches!(err, TransectError::Visum(_)));
    }

    #[test]
    fn test_attribute_query_error_display() {
        let err = VisumError::AttributeQueryFailed {
            collection: "Links".to_string(),
            message: "unknown attribute VolVehPrT(XX)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Attribute query failed for Links: unknown attribute VolVehPrT(XX)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: TransectError = io_err.into();
        assert!(matches!(err, TransectError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: TransectError = toml_err.into();
        assert!(matches!(err, TransectError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_transect_error_implements_std_error() {
        let err = TransectError::Export("test".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_visum_error_implements_std_error() {
        let err = VisumError::Timeout("30s elapsed".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
