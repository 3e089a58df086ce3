//! Primary exporters
//!
//! One [`ExportSource`](crate::core::export::exporter::ExportSource) per job
//! type, each wired to the dependent exporters that travel with it:
//!
//! | job type | dependents |
//! |---|---|
//! | product | none |
//! | gift certificate | transactions |
//! | category | linked categories |
//! | catalog | product types, category types, attributes, sku options, brands, synonym groups |

pub mod catalog;
pub mod category;
pub mod gift_certificate;
pub mod product;

pub use catalog::{catalog_exporter, CatalogSource};
pub use category::{category_exporter, CategorySource};
pub use gift_certificate::{gift_certificate_exporter, GiftCertificateSource};
pub use product::{product_exporter, ProductSource};
