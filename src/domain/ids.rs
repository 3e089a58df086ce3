//! Domain identifier types with validation
//!
//! Newtype wrappers keep entity GUIDs and catalog codes from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity GUID newtype wrapper
///
/// Every exportable entity carries a globally unique identifier. The value is
/// opaque to Catex; only emptiness is rejected.
///
/// # Examples
///
/// ```
/// use catex::domain::ids::Guid;
/// use std::str::FromStr;
///
/// let guid = Guid::from_str("8C9A1E2F-BRAND").unwrap();
/// assert_eq!(guid.as_str(), "8C9A1E2F-BRAND");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid(String);

impl Guid {
    /// Creates a new Guid, trimming surrounding whitespace
    ///
    /// # Returns
    ///
    /// Returns `Ok(Guid)` if the GUID is non-empty, `Err` otherwise
    pub fn new(guid: impl Into<String>) -> Result<Self, String> {
        let guid = guid.into();
        let trimmed = guid.trim();
        if trimmed.is_empty() {
            return Err("GUID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the GUID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Guid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Guid {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Catalog code newtype wrapper
///
/// Catalogs are addressed by their code. The code doubles as the catalog's
/// GUID in the dependency registry (see [`CatalogCode::to_guid`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogCode(String);

impl CatalogCode {
    /// Creates a new CatalogCode
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err("Catalog code cannot be empty".to_string());
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(format!("Catalog code cannot contain whitespace: '{trimmed}'"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the catalog code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the registry GUID for this catalog
    pub fn to_guid(&self) -> Guid {
        Guid(self.0.clone())
    }
}

impl fmt::Display for CatalogCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CatalogCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CatalogCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CatalogCode> for String {
    fn from(code: CatalogCode) -> Self {
        code.0
    }
}

impl From<&Guid> for CatalogCode {
    fn from(guid: &Guid) -> Self {
        CatalogCode(guid.0.clone())
    }
}

impl AsRef<str> for CatalogCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_valid() {
        let guid = Guid::new("ABC-123").unwrap();
        assert_eq!(guid.as_str(), "ABC-123");
        assert_eq!(guid.to_string(), "ABC-123");
    }

    #[test]
    fn test_guid_is_trimmed() {
        let guid = Guid::new("  ABC-123 ").unwrap();
        assert_eq!(guid.as_str(), "ABC-123");
    }

    #[test]
    fn test_guid_empty() {
        assert!(Guid::new("").is_err());
        assert!(Guid::new("   ").is_err());
    }

    #[test]
    fn test_guid_serde_rejects_empty() {
        let parsed: Result<Guid, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: Guid = serde_json::from_str("\"G-1\"").unwrap();
        assert_eq!(parsed.as_str(), "G-1");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"G-1\"");
    }

    #[test]
    fn test_catalog_code_valid() {
        let code = CatalogCode::from_str("SNAPITUP").unwrap();
        assert_eq!(code.as_str(), "SNAPITUP");
        assert_eq!(code.to_guid().as_str(), "SNAPITUP");
    }

    #[test]
    fn test_catalog_code_invalid() {
        assert!(CatalogCode::new("").is_err());
        assert!(CatalogCode::new("SNAP IT UP").is_err());
    }

    #[test]
    fn test_catalog_code_from_guid() {
        let guid = Guid::new("VIRTUAL").unwrap();
        let code = CatalogCode::from(&guid);
        assert_eq!(code.as_str(), "VIRTUAL");
    }
}
