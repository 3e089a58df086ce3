//! Result type alias for Catex

use super::errors::CatexError;

/// Result type alias for Catex operations
///
/// # Examples
///
/// ```
/// use catex::domain::result::Result;
/// use catex::domain::errors::CatexError;
///
/// fn failing_function() -> Result<()> {
///     Err(CatexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CatexError>;
