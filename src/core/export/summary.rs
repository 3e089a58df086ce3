//! Export summary and reporting
//!
//! The summary counts exported objects per job type and records every
//! failure and warning raised while the job runs. Failures never stop the
//! job; they are collected here and reported at the end.

use crate::adapters::bundle::BundleManifest;
use crate::core::verification::VerificationReport;
use crate::domain::ids::Guid;
use crate::domain::kinds::JobType;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Message codes used in summary entries
pub mod codes {
    /// Primary object could not be exported
    pub const OBJECT_EXPORT_FAILED: &str = "IE-20700";
    /// Requested object does not exist in the store
    pub const OBJECT_NOT_FOUND: &str = "IE-20701";
    /// A chunk of objects could not be fetched
    pub const FETCH_FAILED: &str = "IE-20702";
    /// Dependent objects could not be collected
    pub const DEPENDENT_EXPORT_FAILED: &str = "IE-20703";
    /// Exporter could not be initialized
    pub const EXPORTER_INITIALIZATION_FAILED: &str = "IE-20704";
    /// Exporter aborted before processing its objects
    pub const EXPORTER_FAILED: &str = "IE-20705";
    /// Bundle could not be finalized
    pub const BUNDLE_FAILED: &str = "IE-20706";
    /// Dependent object skipped because another catalog owns it
    pub const FOREIGN_CATALOG_OBJECT: &str = "IE-20710";
}

/// Failure or warning recorded during export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    /// Message code (see [`codes`])
    pub code: &'static str,

    /// Human readable message
    pub message: String,

    /// Job type the entry belongs to
    pub job_type: Option<JobType>,

    /// Object the entry refers to
    pub guid: Option<Guid>,
}

impl SummaryEntry {
    /// Create a new entry
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            job_type: None,
            guid: None,
        }
    }

    /// Attach the job type
    pub fn with_job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    /// Attach the object GUID
    pub fn with_guid(mut self, guid: Guid) -> Self {
        self.guid = Some(guid);
        self
    }
}

/// Summary of an export job
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// When the job started
    pub started_at: DateTime<Utc>,

    /// Exported objects per job type
    counters: BTreeMap<JobType, usize>,

    /// Failures, in the order they happened
    pub failures: Vec<SummaryEntry>,

    /// Warnings, in the order they happened
    pub warnings: Vec<SummaryEntry>,

    /// Duration of the job, set when it ends
    pub duration: Duration,

    /// Whether the job was stopped by a shutdown signal
    pub interrupted: bool,

    /// Whether the bundle was written
    pub dry_run: bool,

    /// Manifest of the finished bundle
    pub manifest: Option<BundleManifest>,

    /// Verification report (if verification ran)
    pub verification: Option<VerificationReport>,
}

impl Summary {
    /// Create a new empty summary starting now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            counters: BTreeMap::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            duration: Duration::from_secs(0),
            interrupted: false,
            dry_run: false,
            manifest: None,
            verification: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count `n` exported objects of a job type
    pub fn add_to_counter(&mut self, job_type: JobType, n: usize) {
        *self.counters.entry(job_type).or_insert(0) += n;
    }

    /// Exported objects of a job type
    pub fn counter(&self, job_type: JobType) -> usize {
        self.counters.get(&job_type).copied().unwrap_or(0)
    }

    /// Per job type counters
    pub fn counters(&self) -> &BTreeMap<JobType, usize> {
        &self.counters
    }

    /// Exported objects across all job types
    pub fn total_objects(&self) -> usize {
        self.counters.values().sum()
    }

    /// Record a failure
    pub fn add_failure(&mut self, entry: SummaryEntry) {
        self.failures.push(entry);
    }

    /// Record a warning
    pub fn add_warning(&mut self, entry: SummaryEntry) {
        self.warnings.push(entry);
    }

    /// Failures recorded for a job type
    pub fn failures_for(&self, job_type: JobType) -> impl Iterator<Item = &SummaryEntry> {
        self.failures
            .iter()
            .filter(move |f| f.job_type == Some(job_type))
    }

    /// Attach the verification report
    pub fn set_verification_report(&mut self, report: VerificationReport) {
        self.verification = Some(report);
    }

    /// Elapsed time since the job started
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }

    /// Check if the job finished without failures and its bundle verified
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
            && !self.interrupted
            && self
                .verification
                .as_ref()
                .map_or(true, VerificationReport::is_success)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_objects = self.total_objects(),
            failures = self.failures.len(),
            warnings = self.warnings.len(),
            duration_ms = self.duration.as_millis() as u64,
            interrupted = self.interrupted,
            dry_run = self.dry_run,
            "Export completed"
        );

        for (job_type, count) in &self.counters {
            tracing::info!(job_type = %job_type, count = count, "Exported objects");
        }

        for warning in &self.warnings {
            tracing::warn!(
                code = warning.code,
                job_type = ?warning.job_type,
                guid = ?warning.guid.as_ref().map(Guid::as_str),
                message = %warning.message,
                "Export warning"
            );
        }

        for failure in &self.failures {
            tracing::error!(
                code = failure.code,
                job_type = ?failure.job_type,
                guid = ?failure.guid.as_ref().map(Guid::as_str),
                message = %failure.message,
                "Export failure"
            );
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_summary_creation() {
        let summary = Summary::new();

        assert_eq!(summary.total_objects(), 0);
        assert_eq!(summary.counter(JobType::Product), 0);
        assert!(summary.failures.is_empty());
        assert!(summary.warnings.is_empty());
        assert!(!summary.interrupted);
        assert!(summary.is_successful());
    }

    #[test]
    fn test_add_to_counter_accumulates() {
        let mut summary = Summary::new();
        summary.add_to_counter(JobType::Product, 1);
        summary.add_to_counter(JobType::Product, 2);
        summary.add_to_counter(JobType::Catalog, 1);

        assert_eq!(summary.counter(JobType::Product), 3);
        assert_eq!(summary.counter(JobType::Catalog), 1);
        assert_eq!(summary.total_objects(), 4);
    }

    #[test]
    fn test_failure_makes_summary_unsuccessful() {
        let mut summary = Summary::new();
        summary.add_warning(SummaryEntry::new(codes::OBJECT_NOT_FOUND, "missing"));
        assert!(summary.is_successful());

        summary.add_failure(
            SummaryEntry::new(codes::OBJECT_EXPORT_FAILED, "boom")
                .with_job_type(JobType::Product)
                .with_guid(Guid::from_str("P1").unwrap()),
        );
        assert!(!summary.is_successful());
        assert_eq!(summary.failures_for(JobType::Product).count(), 1);
        assert_eq!(summary.failures_for(JobType::Catalog).count(), 0);
    }

    #[test]
    fn test_interrupted_is_not_successful() {
        let mut summary = Summary::new();
        summary.interrupted = true;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_with_duration() {
        let summary = Summary::new().with_duration(Duration::from_secs(120));
        assert_eq!(summary.duration, Duration::from_secs(120));
    }
}
