//! Export context
//!
//! One context is shared by every exporter of a job. It carries the job
//! configuration, the store, the dependency registry and the running summary.

use crate::adapters::store::{CatalogStore, ExportQuery};
use crate::config::schema::{DependencyMode, ExportConfig};
use crate::core::export::registry::DependencyRegistry;
use crate::core::export::summary::Summary;
use crate::domain::kinds::EntityKind;
use std::sync::Arc;
use tokio::sync::watch;

/// State shared across an export job
pub struct ExportContext {
    config: ExportConfig,
    query: ExportQuery,
    store: Arc<dyn CatalogStore>,
    registry: DependencyRegistry,
    summary: Summary,
    shutdown: Option<watch::Receiver<bool>>,
}

impl ExportContext {
    /// Create a context for a job
    pub fn new(config: ExportConfig, query: ExportQuery, store: Arc<dyn CatalogStore>) -> Self {
        Self {
            config,
            query,
            store,
            registry: DependencyRegistry::default(),
            summary: Summary::new(),
            shutdown: None,
        }
    }

    /// Attach a shutdown signal checked between chunks
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Export settings
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Primary object selection
    pub fn query(&self) -> &ExportQuery {
        &self.query
    }

    /// Catalog store
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Dependency registry
    pub fn registry(&self) -> &DependencyRegistry {
        &self.registry
    }

    /// Dependency registry, mutable
    pub fn registry_mut(&mut self) -> &mut DependencyRegistry {
        &mut self.registry
    }

    /// Running summary
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Running summary, mutable
    pub fn summary_mut(&mut self) -> &mut Summary {
        &mut self.summary
    }

    /// Consume the context and return the summary
    pub fn into_summary(self) -> Summary {
        self.summary
    }

    /// How dependents of `kind` are selected
    pub fn dependency_mode(&self, kind: EntityKind) -> DependencyMode {
        self.config.dependencies.mode_for(kind)
    }

    /// Number of objects fetched per store round trip
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Whether a shutdown has been requested
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}
