//! Domain models and types for Catex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`Guid`], [`CatalogCode`])
//! - **Registry keys** ([`EntityKind`], [`JobType`])
//! - **Catalog models** ([`Catalog`], [`Category`], [`Product`], metadata types)
//! - **Catalog scoping** ([`CatalogObject`], [`CatalogScope`])
//! - **Error types** ([`CatexError`], [`StoreError`]) and the [`Result`] alias
//!
//! # Catalog scoping
//!
//! ```rust
//! use catex::domain::{Brand, CatalogCode, CatalogScope};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let master = CatalogCode::new("MASTER")?;
//! let brand: Brand = serde_json::from_str(
//!     r#"{"guid": "B1", "code": "CANON", "name": "Canon", "catalog": "MASTER"}"#,
//! )?;
//! assert_eq!(CatalogScope::of(&brand, &master), CatalogScope::ThisCatalog);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod category;
pub mod context;
pub mod errors;
pub mod gift_certificate;
pub mod ids;
pub mod kinds;
pub mod metadata;
pub mod product;
pub mod result;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogObject, CatalogScope};
pub use category::{AttributeValue, Category};
pub use errors::{CatexError, StoreError};
pub use gift_certificate::{GiftCertificate, GiftCertificateTransaction};
pub use ids::{CatalogCode, Guid};
pub use kinds::{EntityKind, JobType};
pub use metadata::{
    Attribute, Brand, CategoryType, ProductType, SkuOption, SkuOptionValue, SynonymGroup,
};
pub use product::{Product, Sku, SkuOptionValueRef};
pub use result::Result;
