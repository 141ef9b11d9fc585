//! Result type alias for Carebook
//!
//! This module provides a convenient Result type alias that uses CarebookError
//! as the error type.

use super::errors::CarebookError;

/// Result type alias for Carebook operations
///
/// # Examples
///
/// ```
/// use carebook::domain::result::Result;
/// use carebook::domain::errors::CarebookError;
///
/// fn lookup() -> Result<String> {
///     Ok("p001".to_string())
/// }
///
/// fn missing() -> Result<()> {
///     Err(CarebookError::NotFound("p404".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CarebookError>;
