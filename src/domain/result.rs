//! Result type alias for Transect

use super::errors::TransectError;

/// Result type alias for Transect operations
///
/// This is a convenience type alias that uses `TransectError` as the error
/// type. Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, TransectError>;
