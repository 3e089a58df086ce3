//! Export coordinator - main orchestrator for the export process
//!
//! The coordinator owns one export job: it loads the catalog store, runs the
//! exporter sequence against a shared [`ExportContext`], closes the bundle
//! and, when enabled, verifies what was written.

use crate::adapters::bundle::{ExportSink, FileBundleSink};
use crate::adapters::store::{CatalogStore, InMemoryCatalogStore};
use crate::config::CatexConfig;
use crate::core::export::context::ExportContext;
use crate::core::export::factory::ExporterFactory;
use crate::core::export::summary::{codes, Summary, SummaryEntry};
use crate::core::verification::Verifier;
use crate::domain::context::ResultExt;
use crate::domain::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use uuid::Uuid;

/// Export coordinator
pub struct ExportCoordinator {
    config: CatexConfig,
    store: Arc<dyn CatalogStore>,
    factory: ExporterFactory,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator reading the snapshot named in the configuration
    pub async fn new(config: CatexConfig, shutdown_signal: watch::Receiver<bool>) -> Result<Self> {
        let store = InMemoryCatalogStore::from_file(&config.source.path)
            .await
            .with_context(|| format!("Failed to load catalog snapshot {}", config.source.path))?;
        Ok(Self::with_store(config, Arc::new(store), shutdown_signal))
    }

    /// Create a coordinator over an existing store
    pub fn with_store(
        config: CatexConfig,
        store: Arc<dyn CatalogStore>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            store,
            factory: ExporterFactory,
            shutdown_signal,
        }
    }

    /// Execute the export
    ///
    /// Writes the bundle to the configured output directory, runs
    /// verification when it is enabled and the bundle was written, and logs
    /// the summary.
    pub async fn execute_export(&self) -> Result<Summary> {
        let job_id = Uuid::new_v4();
        let output_dir = &self.config.export.output_dir;
        let dry_run = self.config.application.dry_run;
        let mut sink = FileBundleSink::new(output_dir, job_id, dry_run);

        crate::log_export_start!(job_id, self.config.export.job_types, dry_run);

        let mut summary = self.execute_with_sink(&mut sink).await?;

        if self.config.verification.enable_verification && !dry_run && summary.manifest.is_some() {
            tracing::info!("Running post-export verification");
            let verification_start = Instant::now();
            match Verifier::new(output_dir).verify_bundle().await {
                Ok(report) => {
                    tracing::info!(
                        total_verified = report.total_verified,
                        passed = report.passed,
                        failed = report.failed,
                        success_rate = format!("{:.2}%", report.success_rate()),
                        "Verification completed"
                    );
                    for failure in &report.failures {
                        tracing::warn!(
                            subject = %failure.subject,
                            reason = %failure.reason,
                            "Verification failure"
                        );
                    }
                    summary.set_verification_report(report);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Verification failed");
                    summary.add_failure(SummaryEntry::new(
                        codes::BUNDLE_FAILED,
                        format!("Verification failed: {e}"),
                    ));
                }
            }
            summary.duration += verification_start.elapsed();
        }

        summary.log_summary();
        crate::log_export_complete!(job_id, summary);

        Ok(summary)
    }

    /// Run every exporter of the job into `sink` and close it
    ///
    /// Exporter failures are recorded in the summary; the job goes on with
    /// the next exporter.
    pub async fn execute_with_sink(&self, sink: &mut dyn ExportSink) -> Result<Summary> {
        let start_time = Instant::now();

        let mut ctx = ExportContext::new(
            self.config.export.clone(),
            self.config.export.query.to_query(),
            self.store.clone(),
        )
        .with_shutdown(self.shutdown_signal.clone());
        ctx.summary_mut().dry_run = self.config.application.dry_run;

        let plan = self.factory.plan(&self.config.export.job_types);
        tracing::info!(
            exporters = ?plan,
            batch_size = ctx.batch_size(),
            "Starting export process"
        );

        for mut exporter in self.factory.sequence(&self.config.export.job_types) {
            if ctx.is_shutdown_requested() {
                tracing::warn!("Shutdown requested, skipping remaining exporters");
                ctx.summary_mut().interrupted = true;
                break;
            }

            let job_type = exporter.job_type();

            if let Err(e) = exporter.initialize(&mut ctx).await {
                tracing::error!(job_type = %job_type, error = %e, "Exporter initialization failed");
                ctx.summary_mut().add_failure(
                    SummaryEntry::new(codes::EXPORTER_INITIALIZATION_FAILED, e.to_string())
                        .with_job_type(job_type),
                );
                continue;
            }

            if let Err(e) = exporter.process_export(&mut ctx, sink).await {
                tracing::error!(job_type = %job_type, error = %e, "Exporter failed");
                ctx.summary_mut().add_failure(
                    SummaryEntry::new(codes::EXPORTER_FAILED, e.to_string())
                        .with_job_type(job_type),
                );
            }

            if !exporter.is_finished() {
                ctx.summary_mut().interrupted = true;
            }
        }

        let mut summary = ctx.into_summary();

        match sink.finish().await {
            Ok(manifest) => summary.manifest = Some(manifest),
            Err(e) => {
                tracing::error!(error = %e, "Failed to finalize bundle");
                summary.add_failure(SummaryEntry::new(codes::BUNDLE_FAILED, e.to_string()));
            }
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }
}
