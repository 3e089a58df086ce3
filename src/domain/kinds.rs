//! Entity kinds and export job types
//!
//! [`EntityKind`] identifies a type of domain object in the dependency
//! registry. [`JobType`] identifies an exporter and the bundle document it
//! writes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of domain entity tracked by the dependency registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Catalog,
    Category,
    Product,
    Attribute,
    Brand,
    CategoryType,
    ProductType,
    SkuOption,
    SynonymGroup,
    GiftCertificate,
}

impl EntityKind {
    /// All kinds, in declaration order
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Catalog,
        EntityKind::Category,
        EntityKind::Product,
        EntityKind::Attribute,
        EntityKind::Brand,
        EntityKind::CategoryType,
        EntityKind::ProductType,
        EntityKind::SkuOption,
        EntityKind::SynonymGroup,
        EntityKind::GiftCertificate,
    ];

    /// Stable snake_case name used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Catalog => "catalog",
            EntityKind::Category => "category",
            EntityKind::Product => "product",
            EntityKind::Attribute => "attribute",
            EntityKind::Brand => "brand",
            EntityKind::CategoryType => "category_type",
            EntityKind::ProductType => "product_type",
            EntityKind::SkuOption => "sku_option",
            EntityKind::SynonymGroup => "synonym_group",
            EntityKind::GiftCertificate => "gift_certificate",
        }
    }

    /// The exporter responsible for writing entities of this kind
    ///
    /// Catalog metadata (attributes, brands, types, options, synonym groups)
    /// travels inside the catalog document.
    pub fn owning_job(&self) -> JobType {
        match self {
            EntityKind::Catalog
            | EntityKind::Attribute
            | EntityKind::Brand
            | EntityKind::CategoryType
            | EntityKind::ProductType
            | EntityKind::SkuOption
            | EntityKind::SynonymGroup => JobType::Catalog,
            EntityKind::Category => JobType::Category,
            EntityKind::Product => JobType::Product,
            EntityKind::GiftCertificate => JobType::GiftCertificate,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown entity kind: '{s}'"))
    }
}

/// Export job type
///
/// Each job type corresponds to one exporter and one bundle document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Product,
    GiftCertificate,
    Category,
    Catalog,
}

impl JobType {
    /// All job types, in declaration order
    pub const ALL: [JobType; 4] = [
        JobType::Product,
        JobType::GiftCertificate,
        JobType::Category,
        JobType::Catalog,
    ];

    /// Stable snake_case name used in configuration, file names and counters
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Product => "product",
            JobType::GiftCertificate => "gift_certificate",
            JobType::Category => "category",
            JobType::Catalog => "catalog",
        }
    }

    /// Position in the export sequence
    ///
    /// Exporters that discover references run before the exporters that
    /// write the referenced entities.
    pub fn rank(&self) -> u8 {
        match self {
            JobType::Product => 0,
            JobType::GiftCertificate => 1,
            JobType::Category => 2,
            JobType::Catalog => 3,
        }
    }

    /// Name of the bundle document written for this job type
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        JobType::ALL
            .iter()
            .copied()
            .find(|job| job.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown job type '{s}'. Must be one of: {}",
                    JobType::ALL.map(|j| j.as_str()).join(", ")
                )
            })
    }
}
