//! Bundle output
//!
//! Exported objects are written as a bundle: one JSON document per job type
//! and a manifest with checksums.

pub mod sink;

pub use sink::{BundleManifest, ExportSink, FileBundleSink, ManifestEntry, MemorySink, MANIFEST_FILE};
