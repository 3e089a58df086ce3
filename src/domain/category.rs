//! Category model

use super::catalog::CatalogObject;
use super::ids::{CatalogCode, Guid};
use serde::{Deserialize, Serialize};

/// Attribute value attached to a category, product or sku
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// GUID of the attribute definition
    pub attribute: Guid,
    pub value: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Category
///
/// Categories in a virtual catalog are usually linked categories: they point
/// at a master category through `linked_from` and carry no content of their
/// own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub guid: Guid,
    pub code: String,
    pub catalog: CatalogCode,

    #[serde(default)]
    pub name: Option<String>,

    /// Parent category, `None` for root categories
    #[serde(default)]
    pub parent: Option<Guid>,

    #[serde(default)]
    pub category_type: Option<Guid>,

    /// Master category this linked category mirrors
    #[serde(default)]
    pub linked_from: Option<Guid>,

    #[serde(default)]
    pub ordering: i32,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
}

impl Category {
    /// Returns true if this category mirrors a master category
    pub fn is_linked(&self) -> bool {
        self.linked_from.is_some()
    }
}

impl CatalogObject for Category {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}
