//! Catalog model and catalog scoping
//!
//! A master catalog owns its attributes, brands, types and options directly.
//! A virtual catalog owns only categories that link to master categories,
//! so nothing else is in scope for it.

use super::ids::{CatalogCode, Guid};
use serde::{Deserialize, Serialize};

/// Catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog code
    pub code: CatalogCode,

    /// Display name
    pub name: String,

    /// True for master catalogs, false for virtual catalogs
    #[serde(default = "default_master")]
    pub master: bool,

    /// Default language (master catalogs only)
    #[serde(default)]
    pub default_language: Option<String>,

    /// Supported languages
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Catalog {
    /// Returns true if this is a virtual catalog
    pub fn is_virtual(&self) -> bool {
        !self.master
    }
}

fn default_master() -> bool {
    true
}

/// Entity owned by a catalog, or global
pub trait CatalogObject {
    /// Entity GUID
    fn guid(&self) -> &Guid;

    /// Owning catalog, `None` for global entities
    fn catalog(&self) -> Option<&CatalogCode>;

    /// Whether the entity is shared by all catalogs
    fn is_global(&self) -> bool {
        self.catalog().is_none()
    }
}

/// Position of a catalog object relative to the catalog being exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    /// Owned by the catalog being exported
    ThisCatalog,
    /// Not owned by any catalog
    Global,
    /// Owned by some other catalog
    OtherCatalog,
}

impl CatalogScope {
    /// Classifies `object` relative to `catalog`
    pub fn of<T: CatalogObject + ?Sized>(object: &T, catalog: &CatalogCode) -> Self {
        if object.is_global() {
            return CatalogScope::Global;
        }
        match object.catalog() {
            Some(owner) if owner == catalog => CatalogScope::ThisCatalog,
            Some(_) => CatalogScope::OtherCatalog,
            None => CatalogScope::Global,
        }
    }
}
