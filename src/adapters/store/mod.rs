//! Catalog store adapters
//!
//! The store is the external persistence service exporters read from.

pub mod memory;
pub mod traits;

pub use memory::{InMemoryCatalogStore, StoreSnapshot};
pub use traits::{CatalogStore, ExportQuery};
