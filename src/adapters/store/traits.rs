//! Catalog store abstraction
//!
//! The store is the persistence layer the exporters read from. Catex never
//! writes to it.

use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::JobType;
use crate::domain::{
    Attribute, Brand, Catalog, Category, CategoryType, GiftCertificate,
    GiftCertificateTransaction, Product, ProductType, Result, SkuOption, SynonymGroup,
};
use async_trait::async_trait;

/// Selection of primary objects for an export job
///
/// An empty query selects nothing. Catalog codes select every object the
/// catalog contains; GUIDs select individual objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportQuery {
    /// Catalogs whose content is exported
    pub catalog_codes: Vec<CatalogCode>,

    /// Individual objects to export
    pub guids: Vec<Guid>,

    /// Stores whose gift certificates are exported
    pub store_codes: Vec<String>,
}

impl ExportQuery {
    /// Returns true if the query selects nothing
    pub fn is_empty(&self) -> bool {
        self.catalog_codes.is_empty() && self.guids.is_empty() && self.store_codes.is_empty()
    }
}

/// Read access to catalog data
///
/// Lookups by GUID return the objects that exist, in request order; unknown
/// GUIDs are skipped rather than reported as errors.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Resolve a query to the GUIDs of primary objects of `job_type`
    async fn query_guids(&self, job_type: JobType, query: &ExportQuery) -> Result<Vec<Guid>>;

    /// Find catalogs by code
    async fn find_catalogs(&self, codes: &[CatalogCode]) -> Result<Vec<Catalog>>;

    /// Find categories by GUID
    async fn find_categories(&self, guids: &[Guid]) -> Result<Vec<Category>>;

    /// Ancestors of a category, nearest parent first
    ///
    /// Returns an empty list for root categories.
    async fn find_category_ancestors(&self, category: &Guid) -> Result<Vec<Category>>;

    /// Find categories in virtual catalogs that link to `master_category`
    async fn find_linked_categories(&self, master_category: &Guid) -> Result<Vec<Category>>;

    /// Find products by GUID
    async fn find_products(&self, guids: &[Guid]) -> Result<Vec<Product>>;

    /// Find gift certificates by GUID
    async fn find_gift_certificates(&self, guids: &[Guid]) -> Result<Vec<GiftCertificate>>;

    /// Transactions recorded against a gift certificate, oldest first
    async fn find_gift_certificate_transactions(
        &self,
        gift_certificate: &Guid,
    ) -> Result<Vec<GiftCertificateTransaction>>;

    /// Find attributes by GUID
    async fn find_attributes(&self, guids: &[Guid]) -> Result<Vec<Attribute>>;

    /// Attributes owned by `catalog`
    async fn find_catalog_attributes(&self, catalog: &CatalogCode) -> Result<Vec<Attribute>>;

    /// Attributes shared by all catalogs
    async fn find_global_attributes(&self) -> Result<Vec<Attribute>>;

    /// Find brands by GUID
    async fn find_brands(&self, guids: &[Guid]) -> Result<Vec<Brand>>;

    /// Brands owned by `catalog`
    async fn find_catalog_brands(&self, catalog: &CatalogCode) -> Result<Vec<Brand>>;

    /// Find category types by GUID
    async fn find_category_types(&self, guids: &[Guid]) -> Result<Vec<CategoryType>>;

    /// Category types owned by `catalog`
    async fn find_catalog_category_types(&self, catalog: &CatalogCode)
        -> Result<Vec<CategoryType>>;

    /// Find product types by GUID
    async fn find_product_types(&self, guids: &[Guid]) -> Result<Vec<ProductType>>;

    /// Product types owned by `catalog`
    async fn find_catalog_product_types(&self, catalog: &CatalogCode) -> Result<Vec<ProductType>>;

    /// Find sku options by GUID
    async fn find_sku_options(&self, guids: &[Guid]) -> Result<Vec<SkuOption>>;

    /// Sku options owned by `catalog`
    async fn find_catalog_sku_options(&self, catalog: &CatalogCode) -> Result<Vec<SkuOption>>;

    /// Synonym groups owned by `catalog`
    async fn find_catalog_synonym_groups(&self, catalog: &CatalogCode)
        -> Result<Vec<SynonymGroup>>;
}
