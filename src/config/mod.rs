//! Configuration management for Catex.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Catex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CATEX_*` environment overrides
//! - Default values for optional settings
//! - Validation of every section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use catex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("catex.toml")?;
//!
//! println!("Snapshot: {}", config.source.path);
//! println!("Job types: {:?}", config.export.job_types);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`SourceConfig`] - Catalog snapshot location
//! - [`ExportConfig`] - Job types, batch size, output directory
//! - [`QueryConfig`] - Primary object selection
//! - [`DependencyConfig`] - Dependent object selection per entity kind
//! - [`VerificationConfig`] - Post-export bundle verification
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! path = "${CATEX_SNAPSHOT}"
//!
//! [export]
//! job_types = ["product", "category"]
//! batch_size = 100
//! output_dir = "export"
//!
//! [export.query]
//! catalog_codes = ["MASTER"]
//!
//! [export.dependencies]
//! default = "all"
//! attribute = "referenced"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CatexConfig, DependencyConfig, DependencyMode, ExportConfig,
    LoggingConfig, QueryConfig, SourceConfig, VerificationConfig,
};
