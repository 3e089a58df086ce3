//! Export sinks
//!
//! A sink receives the serialized DTOs produced by the exporters and turns
//! them into a bundle: one JSON array per job type plus a manifest listing
//! every document with its object count and SHA-256 checksum.

use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::domain::ids::Guid;
use crate::domain::kinds::JobType;
use crate::domain::{CatexError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File name of the bundle manifest
pub const MANIFEST_FILE: &str = "manifest.json";

/// One document of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub job_type: JobType,
    pub file: String,
    pub count: usize,
    pub checksum: String,
}

/// Bundle manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<ManifestEntry>,
}

impl BundleManifest {
    /// Entry for a job type, if the bundle contains one
    pub fn entry(&self, job_type: JobType) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.job_type == job_type)
    }

    /// Total number of objects across all documents
    pub fn total_objects(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Destination for exported objects
#[async_trait]
pub trait ExportSink: Send {
    /// Append one exported object to the document of `job_type`
    async fn write(&mut self, job_type: JobType, guid: &Guid, document: Value) -> Result<()>;

    /// Close the bundle and return its manifest
    async fn finish(&mut self) -> Result<BundleManifest>;
}

/// Sink that keeps every document in memory
#[derive(Debug)]
pub struct MemorySink {
    job_id: Uuid,
    documents: BTreeMap<JobType, Vec<Value>>,
    guids: BTreeMap<JobType, Vec<Guid>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::with_job_id(Uuid::new_v4())
    }

    /// Create an empty sink for a known job
    pub fn with_job_id(job_id: Uuid) -> Self {
        Self {
            job_id,
            documents: BTreeMap::new(),
            guids: BTreeMap::new(),
        }
    }

    /// Objects written for a job type, in write order
    pub fn documents(&self, job_type: JobType) -> &[Value] {
        self.documents
            .get(&job_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// GUIDs written for a job type, in write order
    pub fn guids(&self, job_type: JobType) -> &[Guid] {
        self.guids.get(&job_type).map(Vec::as_slice).unwrap_or_default()
    }

    /// Render each document to its on-disk bytes
    fn render(&self) -> Result<Vec<(JobType, Vec<u8>)>> {
        self.documents
            .iter()
            .map(|(job_type, docs)| {
                serde_json::to_vec_pretty(docs)
                    .map(|bytes| (*job_type, bytes))
                    .map_err(|e| {
                        CatexError::Bundle(format!("Failed to render {job_type} document: {e}"))
                    })
            })
            .collect()
    }

    fn manifest_for(&self, rendered: &[(JobType, Vec<u8>)]) -> BundleManifest {
        let entries = rendered
            .iter()
            .map(|(job_type, bytes)| ManifestEntry {
                job_type: *job_type,
                file: job_type.file_name(),
                count: self.documents(*job_type).len(),
                checksum: calculate_checksum_bytes(bytes),
            })
            .collect();

        BundleManifest {
            job_id: self.job_id,
            created_at: Utc::now(),
            entries,
        }
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn write(&mut self, job_type: JobType, guid: &Guid, document: Value) -> Result<()> {
        self.documents.entry(job_type).or_default().push(document);
        self.guids.entry(job_type).or_default().push(guid.clone());
        Ok(())
    }

    async fn finish(&mut self) -> Result<BundleManifest> {
        let rendered = self.render()?;
        Ok(self.manifest_for(&rendered))
    }
}

/// Sink that writes the bundle to a directory
///
/// Documents are buffered until [`ExportSink::finish`], which writes one file
/// per job type and the manifest. In dry-run mode nothing touches the disk
/// but the manifest is still computed.
#[derive(Debug)]
pub struct FileBundleSink {
    output_dir: PathBuf,
    dry_run: bool,
    buffer: MemorySink,
}

impl FileBundleSink {
    /// Create a sink writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, job_id: Uuid, dry_run: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run,
            buffer: MemorySink::with_job_id(job_id),
        }
    }

    /// Directory the bundle is written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl ExportSink for FileBundleSink {
    async fn write(&mut self, job_type: JobType, guid: &Guid, document: Value) -> Result<()> {
        self.buffer.write(job_type, guid, document).await
    }

    async fn finish(&mut self) -> Result<BundleManifest> {
        let rendered = self.buffer.render()?;
        let manifest = self.buffer.manifest_for(&rendered);

        if self.dry_run {
            tracing::info!(
                output_dir = %self.output_dir.display(),
                documents = manifest.entries.len(),
                objects = manifest.total_objects(),
                "Dry run - bundle not written"
            );
            return Ok(manifest);
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                CatexError::Bundle(format!(
                    "Failed to create output directory {}: {}",
                    self.output_dir.display(),
                    e
                ))
            })?;

        for (job_type, bytes) in &rendered {
            let path = self.output_dir.join(job_type.file_name());
            tokio::fs::write(&path, bytes).await.map_err(|e| {
                CatexError::Bundle(format!("Failed to write {}: {}", path.display(), e))
            })?;
            tracing::debug!(
                job_type = %job_type,
                path = %path.display(),
                bytes = bytes.len(),
                "Wrote bundle document"
            );
        }

        let manifest_path = self.output_dir.join(MANIFEST_FILE);
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;
        tokio::fs::write(&manifest_path, manifest_bytes)
            .await
            .map_err(|e| {
                CatexError::Bundle(format!("Failed to write {}: {}", manifest_path.display(), e))
            })?;

        tracing::info!(
            output_dir = %self.output_dir.display(),
            documents = manifest.entries.len(),
            objects = manifest.total_objects(),
            "Bundle written"
        );

        Ok(manifest)
    }
}
