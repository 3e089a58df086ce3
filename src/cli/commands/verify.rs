//! Verify command implementation
//!
//! This module implements the `verify` command, which checks a bundle that
//! an earlier export wrote.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::verification::Verifier;
use clap::Args;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Bundle directory (defaults to export.output_dir of the configuration)
    #[arg(short, long)]
    pub bundle_dir: Option<String>,
}

impl VerifyArgs {
    /// Execute the verify command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let bundle_dir = match &self.bundle_dir {
            Some(dir) => dir.clone(),
            None => match load_config(config_path) {
                Ok(config) => config.export.output_dir,
                Err(e) => {
                    eprintln!("Failed to load configuration: {e}");
                    return Ok(EXIT_CONFIG);
                }
            },
        };

        tracing::info!(bundle_dir = %bundle_dir, "Verifying bundle");
        println!("🔍 Verifying bundle: {bundle_dir}");
        println!();

        let report = match Verifier::new(&bundle_dir).verify_bundle().await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Verification failed");
                eprintln!("Verification failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        println!("{}", report.format_summary());

        if report.is_success() {
            println!("✅ Bundle verified");
            Ok(EXIT_SUCCESS)
        } else {
            println!("⚠️  Bundle has {} failed check(s)", report.failed);
            Ok(EXIT_PARTIAL)
        }
    }
}
