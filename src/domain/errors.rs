//! Domain error types
//!
//! This module defines the error hierarchy for Catex.
//! All errors are domain-specific and don't expose third-party types.

use crate::domain::kinds::EntityKind;
use thiserror::Error;

/// Main Catex error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum CatexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// A domain object could not be adapted to its DTO
    #[error("Adapter error: {0}")]
    Adapter(String),

    /// Bundle writing errors
    #[error("Bundle error: {0}")]
    Bundle(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

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

/// Catalog store errors
///
/// Errors raised by the external store the exporters read from.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot or backing store could not be opened
    #[error("Failed to open store: {0}")]
    OpenFailed(String),

    /// Lookup of a single entity failed
    #[error("{kind} not found: {guid}")]
    NotFound { kind: EntityKind, guid: String },

    /// Catalog referenced by an entity or query is unknown
    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    /// Query could not be evaluated
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Store content is inconsistent
    #[error("Invalid store data: {0}")]
    InvalidData(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CatexError {
    fn from(err: std::io::Error) -> Self {
        CatexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CatexError {
    fn from(err: serde_json::Error) -> Self {
        CatexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CatexError {
    fn from(err: toml::de::Error) -> Self {
        CatexError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catex_error_display() {
        let err = CatexError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::CatalogNotFound("SNAPITUP".to_string());
        let err: CatexError = store_err.into();
        assert!(matches!(err, CatexError::Store(_)));
        assert_eq!(err.to_string(), "Store error: Catalog not found: SNAPITUP");
    }

    #[test]
    fn test_not_found_names_kind() {
        let err = StoreError::NotFound {
            kind: EntityKind::Brand,
            guid: "B-1".to_string(),
        };
        assert_eq!(err.to_string(), "brand not found: B-1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CatexError = io_err.into();
        assert!(matches!(err, CatexError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CatexError = json_err.into();
        assert!(matches!(err, CatexError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CatexError = toml_err.into();
        assert!(matches!(err, CatexError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
