//! Export orchestration
//!
//! This module provides the export loop and everything it shares:
//! - [`context`] - per-job state handed to every exporter
//! - [`registry`] - dependencies registered by exported objects
//! - [`exporter`] - the chunked export loop and its exporter traits
//! - [`factory`] - the exporter sequence for a set of job types
//! - [`coordinator`] - one complete export job
//! - [`summary`] - counters, failures and warnings

pub mod context;
pub mod coordinator;
pub mod exporter;
pub mod factory;
pub mod registry;
pub mod summary;

pub use context::ExportContext;
pub use coordinator::ExportCoordinator;
pub use exporter::{ExportSource, Exporter, ExporterImpl};
pub use factory::ExporterFactory;
pub use registry::DependencyRegistry;
pub use summary::{codes, Summary, SummaryEntry};
