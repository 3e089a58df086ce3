//! Verification logic for post-export validation
//!
//! A bundle is verified in two passes. The first re-reads every document
//! listed in the manifest and compares its SHA-256 checksum and object
//! count. The second checks referential closure: everything an exported
//! product, category or catalog points at must itself be in the bundle, and
//! global attributes must be emitted exactly once.

use crate::adapters::bundle::{BundleManifest, ManifestEntry, MANIFEST_FILE};
use crate::core::transform::{CatalogDto, CategoryDto, ProductDto};
use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::core::verification::report::{VerificationFailure, VerificationReport};
use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::JobType;
use crate::domain::{CatexError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::path::PathBuf;
use std::time::Instant;

type Outcome = std::result::Result<(), VerificationFailure>;

/// Verifier for a bundle directory
pub struct Verifier {
    bundle_dir: PathBuf,
}

/// Objects present in a bundle, by kind
#[derive(Debug, Default)]
struct BundleIndex {
    catalogs: HashSet<CatalogCode>,
    categories: HashSet<Guid>,
    attributes: HashSet<Guid>,
    brands: HashSet<Guid>,
    category_types: HashSet<Guid>,
    product_types: HashSet<Guid>,
    sku_options: HashSet<Guid>,
}

/// References of one object that are missing from the bundle
#[derive(Default)]
struct MissingReferences {
    missing: Vec<String>,
}

impl MissingReferences {
    fn require<T: Eq + Hash + Display>(&mut self, present: &HashSet<T>, kind: &str, key: &T) {
        if !present.contains(key) {
            self.missing.push(format!("{kind} {key}"));
        }
    }

    fn into_outcome(self, subject: String) -> Outcome {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(VerificationFailure::new(
                subject,
                format!("missing from bundle: {}", self.missing.join(", ")),
            ))
        }
    }
}

impl Verifier {
    /// Create a verifier for the bundle written to `bundle_dir`
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
        }
    }

    /// Verify the bundle
    ///
    /// Returns an error only if the manifest cannot be read; every other
    /// problem is recorded in the report.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use catex::core::verification::Verifier;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let report = Verifier::new("export").verify_bundle().await?;
    /// println!("{}", report.format_summary());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify_bundle(&self) -> Result<VerificationReport> {
        let start = Instant::now();
        let mut report = VerificationReport::new();

        let manifest = self.read_manifest().await?;
        tracing::info!(
            bundle_dir = %self.bundle_dir.display(),
            job_id = %manifest.job_id,
            documents = manifest.entries.len(),
            "Starting bundle verification"
        );

        let mut documents: BTreeMap<JobType, Vec<Value>> = BTreeMap::new();
        for entry in &manifest.entries {
            if let Some(objects) = self.verify_document(entry, &mut report).await {
                documents.insert(entry.job_type, objects);
            }
        }

        let catalogs: Vec<CatalogDto> = decode(&documents, JobType::Catalog, &mut report);
        let categories: Vec<CategoryDto> = decode(&documents, JobType::Category, &mut report);
        let products: Vec<ProductDto> = decode(&documents, JobType::Product, &mut report);

        let index = BundleIndex::build(&catalogs, &categories);

        report.record(check_globals_emitted_once(&catalogs));
        for catalog in &catalogs {
            report.record(check_catalog(&index, catalog));
        }
        for category in &categories {
            report.record(check_category(&index, category));
        }
        for product in &products {
            report.record(check_product(&index, product));
        }

        report.set_duration(start.elapsed().as_millis() as u64);

        tracing::info!(
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "Bundle verification completed"
        );

        Ok(report)
    }

    async fn read_manifest(&self) -> Result<BundleManifest> {
        let path = self.bundle_dir.join(MANIFEST_FILE);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            CatexError::Bundle(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CatexError::Bundle(format!("Invalid manifest {}: {}", path.display(), e))
        })
    }

    /// Check one document against its manifest entry
    ///
    /// Returns the parsed objects if the document could be read.
    async fn verify_document(
        &self,
        entry: &ManifestEntry,
        report: &mut VerificationReport,
    ) -> Option<Vec<Value>> {
        let path = self.bundle_dir.join(&entry.file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                report.record_failure(VerificationFailure::new(
                    entry.file.clone(),
                    format!("cannot be read: {e}"),
                ));
                return None;
            }
        };

        let actual = calculate_checksum_bytes(&bytes);
        if actual == entry.checksum {
            report.record_pass();
        } else {
            report.record_failure(VerificationFailure::new(
                entry.file.clone(),
                format!("checksum mismatch: expected {}, got {}", entry.checksum, actual),
            ));
        }

        let objects: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(objects) => objects,
            Err(e) => {
                report.record_failure(VerificationFailure::new(
                    entry.file.clone(),
                    format!("not a JSON array: {e}"),
                ));
                return None;
            }
        };

        if objects.len() == entry.count {
            report.record_pass();
        } else {
            report.record_failure(VerificationFailure::new(
                entry.file.clone(),
                format!("expected {} objects, found {}", entry.count, objects.len()),
            ));
        }

        Some(objects)
    }
}

/// Decode the objects of one document, recording undecodable ones
fn decode<T: DeserializeOwned>(
    documents: &BTreeMap<JobType, Vec<Value>>,
    job_type: JobType,
    report: &mut VerificationReport,
) -> Vec<T> {
    let Some(objects) = documents.get(&job_type) else {
        return Vec::new();
    };

    let mut decoded = Vec::with_capacity(objects.len());
    for (position, object) in objects.iter().enumerate() {
        match serde_json::from_value(object.clone()) {
            Ok(dto) => decoded.push(dto),
            Err(e) => report.record_failure(VerificationFailure::new(
                format!("{} #{}", job_type.file_name(), position),
                format!("invalid {job_type}: {e}"),
            )),
        }
    }
    decoded
}

impl BundleIndex {
    fn build(catalogs: &[CatalogDto], categories: &[CategoryDto]) -> Self {
        let mut index = Self::default();
        for catalog in catalogs {
            index.catalogs.insert(catalog.code.clone());
            index
                .attributes
                .extend(catalog.attributes.iter().map(|a| a.guid.clone()));
            index
                .brands
                .extend(catalog.brands.iter().map(|b| b.guid.clone()));
            index
                .category_types
                .extend(catalog.category_types.iter().map(|t| t.guid.clone()));
            index
                .product_types
                .extend(catalog.product_types.iter().map(|t| t.guid.clone()));
            index
                .sku_options
                .extend(catalog.sku_options.iter().map(|o| o.guid.clone()));
        }
        index
            .categories
            .extend(categories.iter().map(|c| c.guid.clone()));
        index
    }
}

fn check_globals_emitted_once(catalogs: &[CatalogDto]) -> Outcome {
    let mut emitted: HashMap<&Guid, usize> = HashMap::new();
    for attribute in catalogs.iter().flat_map(|c| c.attributes.iter()) {
        if attribute.global {
            *emitted.entry(&attribute.guid).or_insert(0) += 1;
        }
    }

    let mut repeated: Vec<String> = emitted
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(guid, count)| format!("{guid} ({count} times)"))
        .collect();
    if repeated.is_empty() {
        return Ok(());
    }
    repeated.sort();
    Err(VerificationFailure::new(
        "global attributes",
        format!("emitted more than once: {}", repeated.join(", ")),
    ))
}

fn check_catalog(index: &BundleIndex, catalog: &CatalogDto) -> Outcome {
    let mut refs = MissingReferences::default();
    for product_type in &catalog.product_types {
        for attribute in product_type
            .attributes
            .iter()
            .chain(product_type.sku_attributes.iter())
        {
            refs.require(&index.attributes, "attribute", attribute);
        }
        for option in &product_type.sku_options {
            refs.require(&index.sku_options, "sku option", option);
        }
    }
    for category_type in &catalog.category_types {
        for attribute in &category_type.attributes {
            refs.require(&index.attributes, "attribute", attribute);
        }
    }
    refs.into_outcome(format!("catalog {}", catalog.code))
}

fn check_category(index: &BundleIndex, category: &CategoryDto) -> Outcome {
    let mut refs = MissingReferences::default();
    refs.require(&index.catalogs, "catalog", &category.catalog);
    if let Some(parent) = &category.parent {
        refs.require(&index.categories, "category", parent);
    }
    if let Some(category_type) = &category.category_type {
        refs.require(&index.category_types, "category type", category_type);
    }
    for value in &category.attribute_values {
        refs.require(&index.attributes, "attribute", &value.attribute);
    }
    for linked in &category.linked_categories {
        refs.require(&index.catalogs, "catalog", &linked.catalog);
    }
    refs.into_outcome(format!("category {}", category.guid))
}

fn check_product(index: &BundleIndex, product: &ProductDto) -> Outcome {
    let mut refs = MissingReferences::default();
    refs.require(&index.catalogs, "catalog", &product.catalog);
    for category in &product.categories {
        refs.require(&index.categories, "category", category);
    }
    if let Some(brand) = &product.brand {
        refs.require(&index.brands, "brand", brand);
    }
    refs.require(&index.product_types, "product type", &product.product_type);
    let values = product
        .attribute_values
        .iter()
        .chain(product.skus.iter().flat_map(|sku| sku.attribute_values.iter()));
    for value in values {
        refs.require(&index.attributes, "attribute", &value.attribute);
    }
    for (option, _) in product.skus.iter().flat_map(|sku| sku.option_values.iter()) {
        refs.require(&index.sku_options, "sku option", option);
    }
    refs.into_outcome(format!("product {}", product.guid))
}
