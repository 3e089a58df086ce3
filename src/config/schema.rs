//! Configuration schema types
//!
//! This module defines the configuration structure for Catex. Every section
//! validates itself; [`CatexConfig::validate`] runs them all.

use crate::adapters::store::ExportQuery;
use crate::domain::ids::{CatalogCode, Guid};
use crate::domain::kinds::{EntityKind, JobType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main Catex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Catalog data source
    pub source: SourceConfig,

    /// Export settings
    pub export: ExportConfig,

    /// Bundle verification configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CatexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.export.validate()?;
        self.verification.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (run the export without writing the bundle)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Catalog data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path of the JSON catalog snapshot
    pub path: String,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("source.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Selection of primary objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Catalogs whose content is exported
    #[serde(default)]
    pub catalog_codes: Vec<CatalogCode>,

    /// Individual objects to export
    #[serde(default)]
    pub guids: Vec<Guid>,

    /// Stores whose gift certificates are exported
    #[serde(default)]
    pub store_codes: Vec<String>,
}

impl QueryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.catalog_codes.is_empty() && self.guids.is_empty() && self.store_codes.is_empty() {
            return Err(
                "export.query must name at least one catalog code, guid or store code".to_string(),
            );
        }

        if let Some(code) = self.store_codes.iter().find(|c| c.trim().is_empty()) {
            return Err(format!("export.query.store_codes contains an empty code: '{code}'"));
        }

        Ok(())
    }

    /// Build the store query
    pub fn to_query(&self) -> ExportQuery {
        ExportQuery {
            catalog_codes: self.catalog_codes.clone(),
            guids: self.guids.clone(),
            store_codes: self.store_codes.clone(),
        }
    }
}

/// How dependent objects of a kind are selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyMode {
    /// Every object in scope of the primary
    #[default]
    All,
    /// Only objects referenced by exported primaries
    Referenced,
}

/// Dependency selection per entity kind
///
/// ```toml
/// [export.dependencies]
/// default = "all"
/// attribute = "referenced"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Mode for kinds without an override
    #[serde(default)]
    pub default: DependencyMode,

    /// Per-kind overrides
    #[serde(flatten)]
    pub overrides: BTreeMap<EntityKind, DependencyMode>,
}

impl DependencyConfig {
    /// Mode that applies to `kind`
    pub fn mode_for(&self, kind: EntityKind) -> DependencyMode {
        self.overrides.get(&kind).copied().unwrap_or(self.default)
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Primary job types to run
    pub job_types: Vec<JobType>,

    /// Objects fetched from the store per round trip
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Directory the bundle is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Graceful shutdown timeout in seconds
    /// This is the maximum time to wait for the current chunk to complete
    /// before forcing shutdown.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Primary object selection
    #[serde(default)]
    pub query: QueryConfig,

    /// Dependent object selection
    #[serde(default)]
    pub dependencies: DependencyConfig,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.job_types.is_empty() {
            return Err("export.job_types must name at least one job type".to_string());
        }

        if self.batch_size == 0 || self.batch_size > 10000 {
            return Err(format!(
                "export.batch_size must be between 1 and 10000, got {}",
                self.batch_size
            ));
        }

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        self.query.validate()?;

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            job_types: Vec::new(),
            batch_size: default_batch_size(),
            output_dir: default_output_dir(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            query: QueryConfig::default(),
            dependencies: DependencyConfig::default(),
        }
    }
}

/// Bundle verification configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Verify the bundle after a successful export
    #[serde(default)]
    pub enable_verification: bool,
}

impl VerificationConfig {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    100
}

fn default_output_dir() -> String {
    "export".to_string()
}

fn default_shutdown_timeout_secs() -> u64 {
    30
}

fn default_local_path() -> String {
    "/var/log/catex".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn export_config() -> ExportConfig {
        ExportConfig {
            job_types: vec![JobType::Product],
            query: QueryConfig {
                catalog_codes: vec![CatalogCode::from_str("MASTER").unwrap()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
            dry_run: false,
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = export_config();
        assert!(config.validate().is_ok());

        config.batch_size = 0;
        assert!(config.validate().is_err());

        config.batch_size = 10001;
        assert!(config.validate().is_err());

        config.batch_size = 100;
        config.job_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_query_rejected() {
        let mut config = export_config();
        config.query = QueryConfig::default();
        assert!(config.validate().is_err());

        config.query.store_codes = vec!["".to_string()];
        assert!(config.validate().is_err());

        config.query.store_codes = vec!["SNAPITUP".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dependency_mode_overrides() {
        let config: DependencyConfig = toml::from_str(
            r#"
            default = "referenced"
            attribute = "all"
            "#,
        )
        .unwrap();

        assert_eq!(config.mode_for(EntityKind::Attribute), DependencyMode::All);
        assert_eq!(config.mode_for(EntityKind::Brand), DependencyMode::Referenced);
    }

    #[test]
    fn test_dependency_mode_defaults_to_all() {
        let config = DependencyConfig::default();
        assert_eq!(config.mode_for(EntityKind::SkuOption), DependencyMode::All);
    }

    #[test]
    fn test_unknown_dependency_kind_rejected() {
        let result: Result<DependencyConfig, _> = toml::from_str(r#"widget = "all""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_query_to_store_query() {
        let config = export_config();
        let query = config.query.to_query();
        assert_eq!(query.catalog_codes.len(), 1);
        assert!(query.guids.is_empty());
    }
}
