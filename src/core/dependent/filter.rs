//! Dependent exporter filters
//!
//! A filter decides, per primary object, whether a dependent exporter emits
//! every object in scope or only the objects exported primaries referenced.

use crate::config::schema::DependencyMode;
use crate::domain::ids::Guid;
use std::fmt::Debug;

/// Selection policy of a dependent exporter
pub trait DependentExporterFilter: Send + Sync + Debug {
    /// Returns true if only referenced dependents of `primary` are exported
    fn is_filtered(&self, primary: &Guid) -> bool;
}

/// Export only dependents found in the dependency registry
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferencedOnlyFilter;

impl DependentExporterFilter for ReferencedOnlyFilter {
    fn is_filtered(&self, _primary: &Guid) -> bool {
        true
    }
}

/// Export every dependent in scope
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportAllFilter;

impl DependentExporterFilter for ExportAllFilter {
    fn is_filtered(&self, _primary: &Guid) -> bool {
        false
    }
}

/// Filter implementing a configured mode
pub fn filter_for(mode: DependencyMode) -> Box<dyn DependentExporterFilter> {
    match mode {
        DependencyMode::All => Box::new(ExportAllFilter),
        DependencyMode::Referenced => Box::new(ReferencedOnlyFilter),
    }
}
