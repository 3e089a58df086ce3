//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold `ENV_MUTEX` so they
//! do not interfere with each other.

use catex::config::load_config;
use catex::config::schema::DependencyMode;
use catex::domain::kinds::{EntityKind, JobType};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("CATEX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CATEX_APPLICATION_DRY_RUN");
    std::env::remove_var("CATEX_EXPORT_JOB_TYPES");
    std::env::remove_var("CATEX_EXPORT_BATCH_SIZE");
    std::env::remove_var("CATEX_EXPORT_QUERY_CATALOG_CODES");
    std::env::remove_var("TEST_CATEX_SNAPSHOT");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[source]
path = "/data/catalog.json"

[export]
job_types = ["product", "gift_certificate"]
batch_size = 250
output_dir = "/tmp/catex-bundle"
shutdown_timeout_secs = 10

[export.query]
catalog_codes = ["MASTER", "VIRTUAL"]
guids = ["P1", "P2"]
store_codes = ["SNAPITUP"]

[export.dependencies]
default = "referenced"
brand = "all"
synonym_group = "all"

[verification]
enable_verification = true

[logging]
local_enabled = false
local_path = "/tmp/catex-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.source.path, "/data/catalog.json");
    assert_eq!(
        config.export.job_types,
        vec![JobType::Product, JobType::GiftCertificate]
    );
    assert_eq!(config.export.batch_size, 250);
    assert_eq!(config.export.shutdown_timeout_secs, 10);
    assert_eq!(config.export.query.catalog_codes.len(), 2);
    assert_eq!(config.export.query.guids.len(), 2);
    assert_eq!(config.export.query.store_codes, vec!["SNAPITUP"]);

    let dependencies = &config.export.dependencies;
    assert_eq!(dependencies.mode_for(EntityKind::Brand), DependencyMode::All);
    assert_eq!(dependencies.mode_for(EntityKind::SynonymGroup), DependencyMode::All);
    assert_eq!(
        dependencies.mode_for(EntityKind::Attribute),
        DependencyMode::Referenced
    );

    assert!(config.verification.enable_verification);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
[source]
path = "catalog.json"

[export]
job_types = ["category"]

[export.query]
catalog_codes = ["MASTER"]
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.export.batch_size, 100);
    assert_eq!(config.export.output_dir, "export");
    assert_eq!(config.export.shutdown_timeout_secs, 30);
    assert_eq!(
        config.export.dependencies.mode_for(EntityKind::Attribute),
        DependencyMode::All
    );
    assert!(!config.verification.enable_verification);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CATEX_SNAPSHOT", "/snapshots/catalog.json");

    let file = write_config(
        r#"
[source]
path = "${TEST_CATEX_SNAPSHOT}"

[export]
job_types = ["product"]

[export.query]
catalog_codes = ["MASTER"]
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();

    assert_eq!(result.unwrap().source.path, "/snapshots/catalog.json");
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[source]
path = "${TEST_CATEX_SNAPSHOT}"

[export]
job_types = ["product"]

[export.query]
catalog_codes = ["MASTER"]
"#,
    );

    let err = load_config(file.path()).unwrap_err().to_string();
    assert!(err.contains("TEST_CATEX_SNAPSHOT"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CATEX_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("CATEX_APPLICATION_DRY_RUN", "true");
    std::env::set_var("CATEX_EXPORT_JOB_TYPES", "catalog, category");
    std::env::set_var("CATEX_EXPORT_BATCH_SIZE", "20");
    std::env::set_var("CATEX_EXPORT_QUERY_CATALOG_CODES", "VIRTUAL");

    let file = write_config(
        r#"
[application]
log_level = "info"

[source]
path = "catalog.json"

[export]
job_types = ["product"]
batch_size = 500

[export.query]
catalog_codes = ["MASTER"]
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();
    let config = result.unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(config.application.dry_run);
    assert_eq!(
        config.export.job_types,
        vec![JobType::Catalog, JobType::Category]
    );
    assert_eq!(config.export.batch_size, 20);
    assert_eq!(config.export.query.catalog_codes[0].as_str(), "VIRTUAL");
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let empty_query = write_config(
        r#"
[source]
path = "catalog.json"

[export]
job_types = ["product"]
"#,
    );
    assert!(load_config(empty_query.path()).is_err());

    let bad_batch = write_config(
        r#"
[source]
path = "catalog.json"

[export]
job_types = ["product"]
batch_size = 0

[export.query]
catalog_codes = ["MASTER"]
"#,
    );
    assert!(load_config(bad_batch.path()).is_err());

    let bad_mode = write_config(
        r#"
[source]
path = "catalog.json"

[export]
job_types = ["product"]

[export.query]
catalog_codes = ["MASTER"]

[export.dependencies]
brand = "some"
"#,
    );
    assert!(load_config(bad_mode.path()).is_err());
}

#[test]
fn test_unknown_job_type_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[source]
path = "catalog.json"

[export]
job_types = ["price_list"]

[export.query]
catalog_codes = ["MASTER"]
"#,
    );

    assert!(load_config(file.path()).is_err());
}
