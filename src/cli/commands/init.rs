//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "catex.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Catex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point source.path at your catalog snapshot");
                println!("  2. Choose job types and catalogs in {}", self.output);
                println!("  3. Validate configuration: catex validate-config");
                println!("  4. Run export: catex export");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Catex Configuration File
# Catalog export with dependency resolution

[application]
log_level = "info"
dry_run = false

[source]
path = "catalog.json"

[export]
job_types = ["product"]
batch_size = 100
output_dir = "export"

[export.query]
catalog_codes = ["MASTER"]

[export.dependencies]
default = "all"

[verification]
enable_verification = true

[logging]
local_enabled = false
local_path = "/var/log/catex"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Catex Configuration File
# Catalog export with dependency resolution
#
# Values of the form ${VAR_NAME} are replaced with environment variables.
# Any setting can also be overridden with CATEX_<SECTION>_<KEY>, for example
# CATEX_EXPORT_OUTPUT_DIR=/tmp/bundle.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (run the whole export but do not write the bundle)
dry_run = false

# ============================================================================
# Catalog Source
# ============================================================================
[source]
# JSON snapshot of the catalog store
path = "${CATEX_SNAPSHOT}"

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Primary job types: product, gift_certificate, category, catalog
# Categories and catalogs referenced by the primaries are exported too,
# even when not listed here.
job_types = ["product", "category"]

# Objects fetched from the store per round trip (1-10000)
batch_size = 100

# Directory the bundle is written to
output_dir = "export"

# Seconds to wait for the current chunk after a shutdown signal
shutdown_timeout_secs = 30

[export.query]
# Catalogs whose products and categories are exported
catalog_codes = ["MASTER"]

# Individual objects, added to every job type's selection
# guids = ["P1", "P2"]

# Stores whose gift certificates are exported
# store_codes = ["SNAPITUP"]

[export.dependencies]
# "all" exports every dependent object of an exported catalog;
# "referenced" exports only what exported objects reference.
default = "all"

# Per entity kind overrides
# attribute = "referenced"
# brand = "referenced"
# synonym_group = "referenced"

# ============================================================================
# Verification
# ============================================================================
[verification]
# Re-read the bundle after export and check checksums and references
enable_verification = true

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = true
local_path = "/var/log/catex"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
