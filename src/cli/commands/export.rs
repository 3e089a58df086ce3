//! Export command implementation
//!
//! This module implements the `export` command, which runs one export job
//! and writes its bundle.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_PARTIAL, EXIT_SOURCE, EXIT_SUCCESS};
use crate::config::loader::parse_list;
use crate::config::{load_config, CatexConfig};
use crate::core::export::{ExportCoordinator, Summary};
use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::JobType;
use crate::domain::Result;
use clap::Args;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::watch;

/// Number of failures printed before the rest is summarized
const MAX_PRINTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - run the export without writing the bundle
    #[arg(long)]
    pub dry_run: bool,

    /// Override job types to export (comma-separated)
    #[arg(long)]
    pub job_types: Option<String>,

    /// Override catalog code(s) to export (comma-separated)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Override object GUID(s) to export (comma-separated)
    #[arg(long)]
    pub guid: Option<String>,

    /// Override the bundle output directory
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Err(e) = self.apply_overrides(&mut config) {
            eprintln!("Invalid command line override: {e}");
            return Ok(EXIT_CONFIG);
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no bundle will be written");
            println!("🔍 DRY RUN MODE - No bundle will be written");
            println!();
        }

        if !self.yes && !config.application.dry_run && !confirm(&config)? {
            println!("Export cancelled.");
            return Ok(EXIT_SUCCESS);
        }

        let shutdown_timeout = Duration::from_secs(config.export.shutdown_timeout_secs);

        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::new(config, shutdown_signal.clone()).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to load catalog snapshot: {e}");
                return Ok(EXIT_SOURCE);
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = match run_until_timeout(&coordinator, shutdown_signal, shutdown_timeout).await
        {
            Some(Ok(s)) => s,
            Some(Err(e)) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
            None => {
                tracing::warn!(
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Shutdown timeout elapsed, abandoning export"
                );
                eprintln!("Export did not stop within the shutdown timeout");
                return Ok(EXIT_INTERRUPTED);
            }
        };

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("⚠️  Export interrupted. The bundle holds the objects exported so far.");
            tracing::info!("Export interrupted by user signal");
            EXIT_INTERRUPTED
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
            EXIT_SUCCESS
        } else {
            println!("⚠️  Export completed with failures");
            EXIT_PARTIAL
        };

        Ok(exit_code)
    }

    /// Apply command line overrides to the loaded configuration
    pub fn apply_overrides(&self, config: &mut CatexConfig) -> Result<()> {
        if let Some(job_types) = &self.job_types {
            config.export.job_types = parse_list("--job-types", job_types, JobType::from_str)?;
            tracing::info!(job_types = ?config.export.job_types, "Overriding job types from CLI");
        }

        if let Some(catalogs) = &self.catalog {
            config.export.query.catalog_codes =
                parse_list("--catalog", catalogs, CatalogCode::from_str)?;
            tracing::info!(
                catalog_codes = ?config.export.query.catalog_codes,
                "Overriding catalog codes from CLI"
            );
        }

        if let Some(guids) = &self.guid {
            config.export.query.guids = parse_list("--guid", guids, Guid::from_str)?;
            tracing::info!(guids = config.export.query.guids.len(), "Overriding GUIDs from CLI");
        }

        if let Some(output_dir) = &self.output_dir {
            config.export.output_dir = output_dir.clone();
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        Ok(())
    }
}

/// Run the export; once shutdown is requested, wait at most `timeout`
async fn run_until_timeout(
    coordinator: &ExportCoordinator,
    mut shutdown_signal: watch::Receiver<bool>,
    timeout: Duration,
) -> Option<Result<Summary>> {
    let export = coordinator.execute_export();
    tokio::pin!(export);

    tokio::select! {
        result = &mut export => return Some(result),
        Ok(_) = shutdown_signal.wait_for(|stop| *stop) => {}
    }

    tokio::time::timeout(timeout, export).await.ok()
}

fn confirm(config: &CatexConfig) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Export Configuration:");
    println!("  Source: {}", config.source.path);
    println!("  Job types: {:?}", config.export.job_types);
    println!("  Catalogs: {:?}", config.export.query.catalog_codes);
    if !config.export.query.guids.is_empty() {
        println!("  GUIDs: {}", config.export.query.guids.len());
    }
    println!("  Output: {}", config.export.output_dir);
    println!();
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &Summary) {
    println!();
    println!("📊 Export Summary:");
    for (job_type, count) in summary.counters() {
        println!("  {job_type}: {count}");
    }
    println!("  Total objects: {}", summary.total_objects());
    println!("  Warnings: {}", summary.warnings.len());
    println!("  Failures: {}", summary.failures.len());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if let Some(report) = &summary.verification {
        println!("🔍 Verification Results:");
        println!("  Checks: {}", report.total_verified);
        println!("  Passed: {}", report.passed);
        println!("  Failed: {}", report.failed);
        for failure in report.failures.iter().take(MAX_PRINTED_FAILURES) {
            println!("    - {}: {}", failure.subject, failure.reason);
        }
        println!();
    }

    if !summary.failures.is_empty() {
        println!("⚠️  Failures:");
        for failure in summary.failures.iter().take(MAX_PRINTED_FAILURES) {
            match &failure.guid {
                Some(guid) => println!("  - [{}] {}: {}", failure.code, guid, failure.message),
                None => println!("  - [{}] {}", failure.code, failure.message),
            }
        }
        if summary.failures.len() > MAX_PRINTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_PRINTED_FAILURES
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SourceConfig;

    fn config() -> CatexConfig {
        CatexConfig {
            application: Default::default(),
            source: SourceConfig {
                path: "snapshot.json".to_string(),
            },
            export: Default::default(),
            verification: Default::default(),
            logging: Default::default(),
        }
    }

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs::default();
        let mut config = config();

        args.apply_overrides(&mut config).unwrap();

        assert!(config.export.job_types.is_empty());
        assert!(!config.application.dry_run);
        assert_eq!(config.export.output_dir, "export");
    }

    #[test]
    fn test_export_args_with_overrides() {
        let args = ExportArgs {
            dry_run: true,
            job_types: Some("product, category".to_string()),
            catalog: Some("MASTER,VIRTUAL".to_string()),
            guid: Some("P1".to_string()),
            output_dir: Some("out".to_string()),
            ..Default::default()
        };
        let mut config = config();

        args.apply_overrides(&mut config).unwrap();

        assert_eq!(config.export.job_types, vec![JobType::Product, JobType::Category]);
        assert_eq!(config.export.query.catalog_codes.len(), 2);
        assert_eq!(config.export.query.guids[0].as_str(), "P1");
        assert_eq!(config.export.output_dir, "out");
        assert!(config.application.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_job_type_is_rejected() {
        let args = ExportArgs {
            job_types: Some("product,price_list".to_string()),
            ..Default::default()
        };

        assert!(args.apply_overrides(&mut config()).is_err());
    }
}
