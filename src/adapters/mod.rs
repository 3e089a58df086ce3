//! External system integrations for Catex.
//!
//! - [`store`] - Catalog store the exporters read from
//! - [`bundle`] - Sinks the exported documents are written to
//!
//! Both sides are traits ([`store::CatalogStore`], [`bundle::ExportSink`]) so
//! the export loop can run against in-memory implementations in tests.
//!
//! ```rust,no_run
//! use catex::adapters::store::{CatalogStore, ExportQuery, InMemoryCatalogStore};
//! use catex::domain::kinds::JobType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryCatalogStore::from_file("snapshot.json").await?;
//! let guids = store.query_guids(JobType::Product, &ExportQuery::default()).await?;
//! println!("{} products", guids.len());
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod store;
