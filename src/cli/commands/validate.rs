//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Catex configuration file.

use super::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::load_config;
use crate::config::CatexConfig;
use crate::core::export::ExporterFactory;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates every section
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_config_summary(&config);
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

fn print_config_summary(config: &CatexConfig) {
    let plan = ExporterFactory.plan(&config.export.job_types);

    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  Snapshot: {}", config.source.path);
    println!("  Job Types: {:?}", config.export.job_types);
    println!("  Batch Size: {}", config.export.batch_size);
    println!("  Output Directory: {}", config.export.output_dir);
    println!("  Catalogs: {:?}", config.export.query.catalog_codes);
    println!("  Default Dependency Mode: {:?}", config.export.dependencies.default);
    for (kind, mode) in &config.export.dependencies.overrides {
        println!("    {kind}: {mode:?}");
    }
    println!("  Exporter Sequence:");
    for (job_type, primary) in plan {
        let role = if primary { "primary" } else { "dependencies only" };
        println!("    {job_type} ({role})");
    }
    println!("  Verification: {}", config.verification.enable_verification);
    println!();
}
