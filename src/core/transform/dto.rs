//! Bundle data transfer objects
//!
//! DTOs are the serialized shape of exported objects. Dependent objects are
//! nested inside their primary DTO: catalog metadata inside [`CatalogDto`],
//! linked categories inside [`CategoryDto`], transactions inside
//! [`GiftCertificateDto`].

use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::{AttributeValue, SkuOptionValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exported catalog with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDto {
    pub code: CatalogCode,
    pub name: String,
    pub master: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDto>,
    #[serde(default)]
    pub brands: Vec<BrandDto>,
    #[serde(default)]
    pub category_types: Vec<CategoryTypeDto>,
    #[serde(default)]
    pub product_types: Vec<ProductTypeDto>,
    #[serde(default)]
    pub sku_options: Vec<SkuOptionDto>,
    #[serde(default)]
    pub synonym_groups: Vec<SynonymGroupDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDto {
    pub guid: Guid,
    pub key: String,
    pub name: String,
    pub attribute_type: String,
    pub usage: String,
    pub global: bool,
    pub multi_language: bool,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDto {
    pub guid: Guid,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTypeDto {
    pub guid: Guid,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Guid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTypeDto {
    pub guid: Guid,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Guid>,
    #[serde(default)]
    pub sku_attributes: Vec<Guid>,
    #[serde(default)]
    pub sku_options: Vec<Guid>,
    pub multi_sku: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuOptionDto {
    pub guid: Guid,
    pub key: String,
    #[serde(default)]
    pub values: Vec<SkuOptionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroupDto {
    pub guid: Guid,
    pub concept: String,
    pub locale: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Exported category with the virtual catalog categories linked to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub guid: Guid,
    pub code: String,
    pub catalog: CatalogCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<Guid>,
    pub ordering: i32,
    pub hidden: bool,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
    #[serde(default)]
    pub linked_categories: Vec<LinkedCategoryDto>,
}

/// Placement of a master category in a virtual catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedCategoryDto {
    pub guid: Guid,
    pub catalog: CatalogCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Guid>,
    pub ordering: i32,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub guid: Guid,
    pub code: String,
    pub catalog: CatalogCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Vec<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Guid>,
    pub product_type: Guid,
    pub hidden: bool,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
    #[serde(default)]
    pub skus: Vec<SkuDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuDto {
    pub guid: Guid,
    pub code: String,
    /// Sku option GUID and the chosen value key
    #[serde(default)]
    pub option_values: Vec<(Guid, String)>,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
}

/// Exported gift certificate with its transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCertificateDto {
    pub guid: Guid,
    pub code: String,
    pub store_code: String,
    pub currency: String,
    pub purchase_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<GiftCertificateTransactionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCertificateTransactionDto {
    pub guid: Guid,
    pub transaction_type: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    pub created: DateTime<Utc>,
}
