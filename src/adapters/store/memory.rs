//! In-memory catalog store backed by a JSON snapshot
//!
//! The snapshot is a single JSON document with one array per entity type:
//!
//! ```json
//! {
//!   "catalogs": [{"code": "MASTER", "name": "Master"}],
//!   "products": [],
//!   "categories": [],
//!   "attributes": []
//! }
//! ```
//!
//! Missing arrays default to empty.

use super::traits::{CatalogStore, ExportQuery};
use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::{EntityKind, JobType};
use crate::domain::{
    Attribute, Brand, Catalog, CatalogObject, Category, CategoryType, GiftCertificate,
    GiftCertificateTransaction, Product, ProductType, Result, SkuOption, StoreError,
    SynonymGroup,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Serialized store content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub catalogs: Vec<Catalog>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub attributes: Vec<Attribute>,
    pub brands: Vec<Brand>,
    pub category_types: Vec<CategoryType>,
    pub product_types: Vec<ProductType>,
    pub sku_options: Vec<SkuOption>,
    pub synonym_groups: Vec<SynonymGroup>,
    pub gift_certificates: Vec<GiftCertificate>,
    pub gift_certificate_transactions: Vec<GiftCertificateTransaction>,
}

/// Rows of one entity type with a key index
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Clone> Table<T> {
    fn new(kind: &str, rows: Vec<T>, key: impl Fn(&T) -> &str) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            if index.insert(key(row).to_string(), position).is_some() {
                return Err(StoreError::InvalidData(format!(
                    "duplicate {kind} key '{}'",
                    key(row)
                ))
                .into());
            }
        }
        Ok(Self { rows, index })
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&position| &self.rows[position])
    }

    fn pick<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<T> {
        keys.into_iter()
            .filter_map(|key| self.get(key).cloned())
            .collect()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|row| predicate(row)).cloned().collect()
    }
}

/// Catalog store held entirely in memory
#[derive(Debug)]
pub struct InMemoryCatalogStore {
    catalogs: Table<Catalog>,
    categories: Table<Category>,
    products: Table<Product>,
    attributes: Table<Attribute>,
    brands: Table<Brand>,
    category_types: Table<CategoryType>,
    product_types: Table<ProductType>,
    sku_options: Table<SkuOption>,
    synonym_groups: Vec<SynonymGroup>,
    gift_certificates: Table<GiftCertificate>,
    transactions: Vec<GiftCertificateTransaction>,
}

impl InMemoryCatalogStore {
    /// Build a store from a snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if two rows of the same type share a key.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let store = Self {
            catalogs: Table::new("catalog", snapshot.catalogs, |c| c.code.as_str())?,
            categories: Table::new("category", snapshot.categories, |c| c.guid.as_str())?,
            products: Table::new("product", snapshot.products, |p| p.guid.as_str())?,
            attributes: Table::new("attribute", snapshot.attributes, |a| a.guid.as_str())?,
            brands: Table::new("brand", snapshot.brands, |b| b.guid.as_str())?,
            category_types: Table::new("category type", snapshot.category_types, |t| {
                t.guid.as_str()
            })?,
            product_types: Table::new("product type", snapshot.product_types, |t| {
                t.guid.as_str()
            })?,
            sku_options: Table::new("sku option", snapshot.sku_options, |o| o.guid.as_str())?,
            synonym_groups: snapshot.synonym_groups,
            gift_certificates: Table::new("gift certificate", snapshot.gift_certificates, |g| {
                g.guid.as_str()
            })?,
            transactions: snapshot.gift_certificate_transactions,
        };

        tracing::debug!(
            catalogs = store.catalogs.rows.len(),
            categories = store.categories.rows.len(),
            products = store.products.rows.len(),
            attributes = store.attributes.rows.len(),
            "Loaded in-memory catalog store"
        );

        Ok(store)
    }

    /// Load a store from a JSON snapshot file
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::OpenFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&contents).map_err(|e| {
            StoreError::OpenFailed(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Self::from_snapshot(snapshot)
    }

    fn require_catalog(&self, code: &CatalogCode) -> Result<&Catalog> {
        self.catalogs
            .get(code.as_str())
            .ok_or_else(|| StoreError::CatalogNotFound(code.to_string()).into())
    }

    /// Products visible in a catalog
    ///
    /// Master catalogs own their products; a virtual catalog sees every
    /// product placed in one of its categories.
    fn products_in_catalog(&self, catalog: &Catalog) -> Vec<Guid> {
        if catalog.master {
            return self
                .products
                .filter(|p| p.catalog == catalog.code)
                .into_iter()
                .map(|p| p.guid)
                .collect();
        }

        let categories: HashSet<&Guid> = self
            .categories
            .rows
            .iter()
            .filter(|c| c.catalog == catalog.code)
            .map(|c| &c.guid)
            .collect();

        self.products
            .rows
            .iter()
            .filter(|p| p.categories.iter().any(|c| categories.contains(c)))
            .map(|p| p.guid.clone())
            .collect()
    }
}

fn keys(guids: &[Guid]) -> impl Iterator<Item = &str> {
    guids.iter().map(Guid::as_str)
}

fn owned_by<T: CatalogObject>(catalog: &CatalogCode) -> impl Fn(&T) -> bool + '_ {
    move |object| !object.is_global() && object.catalog() == Some(catalog)
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn query_guids(&self, job_type: JobType, query: &ExportQuery) -> Result<Vec<Guid>> {
        let mut guids = Vec::new();

        match job_type {
            JobType::Catalog => {
                for code in &query.catalog_codes {
                    guids.push(self.require_catalog(code)?.code.to_guid());
                }
            }
            JobType::Category => {
                for code in &query.catalog_codes {
                    self.require_catalog(code)?;
                    guids.extend(
                        self.categories
                            .filter(|c| &c.catalog == code)
                            .into_iter()
                            .map(|c| c.guid),
                    );
                }
            }
            JobType::Product => {
                for code in &query.catalog_codes {
                    let catalog = self.require_catalog(code)?;
                    guids.extend(self.products_in_catalog(catalog));
                }
            }
            JobType::GiftCertificate => {
                for store_code in &query.store_codes {
                    guids.extend(
                        self.gift_certificates
                            .filter(|g| &g.store_code == store_code)
                            .into_iter()
                            .map(|g| g.guid),
                    );
                }
            }
        }

        guids.extend(query.guids.iter().cloned());

        tracing::debug!(
            job_type = %job_type,
            matched = guids.len(),
            "Resolved export query"
        );

        Ok(guids)
    }

    async fn find_catalogs(&self, codes: &[CatalogCode]) -> Result<Vec<Catalog>> {
        Ok(self.catalogs.pick(codes.iter().map(CatalogCode::as_str)))
    }

    async fn find_categories(&self, guids: &[Guid]) -> Result<Vec<Category>> {
        Ok(self.categories.pick(keys(guids)))
    }

    async fn find_category_ancestors(&self, category: &Guid) -> Result<Vec<Category>> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        let mut parent = self
            .categories
            .get(category.as_str())
            .and_then(|c| c.parent.clone());

        while let Some(guid) = parent {
            if !seen.insert(guid.clone()) {
                return Err(StoreError::InvalidData(format!(
                    "category hierarchy of '{category}' contains a cycle at '{guid}'"
                ))
                .into());
            }
            let found = self.categories.get(guid.as_str()).ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Category,
                guid: guid.to_string(),
            })?;
            parent = found.parent.clone();
            ancestors.push(found.clone());
        }

        Ok(ancestors)
    }

    async fn find_linked_categories(&self, master_category: &Guid) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .filter(|c| c.linked_from.as_ref() == Some(master_category)))
    }

    async fn find_products(&self, guids: &[Guid]) -> Result<Vec<Product>> {
        Ok(self.products.pick(keys(guids)))
    }

    async fn find_gift_certificates(&self, guids: &[Guid]) -> Result<Vec<GiftCertificate>> {
        Ok(self.gift_certificates.pick(keys(guids)))
    }

    async fn find_gift_certificate_transactions(
        &self,
        gift_certificate: &Guid,
    ) -> Result<Vec<GiftCertificateTransaction>> {
        if self.gift_certificates.get(gift_certificate.as_str()).is_none() {
            return Err(StoreError::NotFound {
                kind: EntityKind::GiftCertificate,
                guid: gift_certificate.to_string(),
            }
            .into());
        }
        let mut transactions: Vec<GiftCertificateTransaction> = self
            .transactions
            .iter()
            .filter(|t| &t.gift_certificate == gift_certificate)
            .cloned()
            .collect();
        transactions.sort_by_key(|t| t.created);
        Ok(transactions)
    }

    async fn find_attributes(&self, guids: &[Guid]) -> Result<Vec<Attribute>> {
        Ok(self.attributes.pick(keys(guids)))
    }

    async fn find_catalog_attributes(&self, catalog: &CatalogCode) -> Result<Vec<Attribute>> {
        self.require_catalog(catalog)?;
        Ok(self.attributes.filter(owned_by::<Attribute>(catalog)))
    }

    async fn find_global_attributes(&self) -> Result<Vec<Attribute>> {
        Ok(self.attributes.filter(|a| a.is_global()))
    }

    async fn find_brands(&self, guids: &[Guid]) -> Result<Vec<Brand>> {
        Ok(self.brands.pick(keys(guids)))
    }

    async fn find_catalog_brands(&self, catalog: &CatalogCode) -> Result<Vec<Brand>> {
        self.require_catalog(catalog)?;
        Ok(self.brands.filter(owned_by::<Brand>(catalog)))
    }

    async fn find_category_types(&self, guids: &[Guid]) -> Result<Vec<CategoryType>> {
        Ok(self.category_types.pick(keys(guids)))
    }

    async fn find_catalog_category_types(
        &self,
        catalog: &CatalogCode,
    ) -> Result<Vec<CategoryType>> {
        self.require_catalog(catalog)?;
        Ok(self.category_types.filter(owned_by::<CategoryType>(catalog)))
    }

    async fn find_product_types(&self, guids: &[Guid]) -> Result<Vec<ProductType>> {
        Ok(self.product_types.pick(keys(guids)))
    }

    async fn find_catalog_product_types(&self, catalog: &CatalogCode) -> Result<Vec<ProductType>> {
        self.require_catalog(catalog)?;
        Ok(self.product_types.filter(owned_by::<ProductType>(catalog)))
    }

    async fn find_sku_options(&self, guids: &[Guid]) -> Result<Vec<SkuOption>> {
        Ok(self.sku_options.pick(keys(guids)))
    }

    async fn find_catalog_sku_options(&self, catalog: &CatalogCode) -> Result<Vec<SkuOption>> {
        self.require_catalog(catalog)?;
        Ok(self.sku_options.filter(owned_by::<SkuOption>(catalog)))
    }

    async fn find_catalog_synonym_groups(
        &self,
        catalog: &CatalogCode,
    ) -> Result<Vec<SynonymGroup>> {
        self.require_catalog(catalog)?;
        Ok(self
            .synonym_groups
            .iter()
            .filter(|g| &g.catalog == catalog)
            .cloned()
            .collect())
    }
}
