//! Catalog metadata entities
//!
//! Attributes, brands, category types, product types, sku options and synonym
//! groups. These never get their own bundle document; they are exported as
//! part of the catalog that owns them.

use super::catalog::CatalogObject;
use super::ids::{CatalogCode, Guid};
use serde::{Deserialize, Serialize};

/// Attribute definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub guid: Guid,

    /// Attribute key, unique within the system
    pub key: String,

    pub name: String,

    /// Value type (short_text, integer, decimal, boolean, ...)
    #[serde(default = "default_attribute_type")]
    pub attribute_type: String,

    /// Where the attribute may be used (product, category, sku)
    #[serde(default = "default_usage")]
    pub usage: String,

    /// Owning catalog; absent for global attributes
    #[serde(default)]
    pub catalog: Option<CatalogCode>,

    #[serde(default)]
    pub global: bool,

    #[serde(default)]
    pub multi_language: bool,

    #[serde(default)]
    pub required: bool,
}

impl CatalogObject for Attribute {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        self.catalog.as_ref()
    }

    fn is_global(&self) -> bool {
        self.global || self.catalog.is_none()
    }
}

/// Brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub guid: Guid,
    pub code: String,
    pub name: String,
    pub catalog: CatalogCode,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CatalogObject for Brand {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}

/// Category type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryType {
    pub guid: Guid,
    pub name: String,
    pub catalog: CatalogCode,

    /// Attributes assigned to categories of this type
    #[serde(default)]
    pub attributes: Vec<Guid>,
}

impl CatalogObject for CategoryType {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}

/// Product type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub guid: Guid,
    pub name: String,
    pub catalog: CatalogCode,

    /// Product-level attributes
    #[serde(default)]
    pub attributes: Vec<Guid>,

    /// Sku-level attributes
    #[serde(default)]
    pub sku_attributes: Vec<Guid>,

    /// Sku options available to multi-sku products of this type
    #[serde(default)]
    pub sku_options: Vec<Guid>,

    #[serde(default)]
    pub multi_sku: bool,

    #[serde(default)]
    pub tax_code: Option<String>,
}

impl ProductType {
    /// Every attribute GUID the type references, product then sku level
    pub fn all_attributes(&self) -> impl Iterator<Item = &Guid> {
        self.attributes.iter().chain(self.sku_attributes.iter())
    }
}

impl CatalogObject for ProductType {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}

/// Sku option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuOptionValue {
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub ordering: i32,
}

/// Sku option (e.g. size, color)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuOption {
    pub guid: Guid,
    pub key: String,
    pub catalog: CatalogCode,
    #[serde(default)]
    pub values: Vec<SkuOptionValue>,
}

impl CatalogObject for SkuOption {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}

/// Search synonym group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub guid: Guid,
    pub catalog: CatalogCode,
    pub concept: String,
    pub locale: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl CatalogObject for SynonymGroup {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}

fn default_attribute_type() -> String {
    "short_text".to_string()
}

fn default_usage() -> String {
    "product".to_string()
}
