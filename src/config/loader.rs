//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CatexConfig;
use crate::domain::errors::CatexError;
use crate::domain::kinds::JobType;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CatexConfig
/// 4. Applies environment variable overrides (CATEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use catex::config::loader::load_config;
///
/// let config = load_config("catex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CatexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CatexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CatexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CatexConfig = toml::from_str(&contents)
        .map_err(|e| CatexError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CatexError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CatexError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(CatexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Parse a comma separated list of values
pub(crate) fn parse_list<T, F>(var: &str, value: &str, parse: F) -> Result<Vec<T>>
where
    F: Fn(&str) -> std::result::Result<T, String>,
{
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            parse(item).map_err(|e| CatexError::Configuration(format!("Invalid {var}: {e}")))
        })
        .collect()
}

/// Applies environment variable overrides using CATEX_* prefix
///
/// Environment variables follow the pattern: CATEX_<SECTION>_<KEY>
/// For example: CATEX_EXPORT_BATCH_SIZE, CATEX_SOURCE_PATH. List values are
/// comma separated.
fn apply_env_overrides(config: &mut CatexConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CATEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CATEX_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Source overrides
    if let Ok(val) = std::env::var("CATEX_SOURCE_PATH") {
        config.source.path = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("CATEX_EXPORT_JOB_TYPES") {
        config.export.job_types =
            parse_list("CATEX_EXPORT_JOB_TYPES", &val, |s| s.parse::<JobType>())?;
    }
    if let Ok(val) = std::env::var("CATEX_EXPORT_BATCH_SIZE") {
        if let Ok(size) = val.parse() {
            config.export.batch_size = size;
        }
    }
    if let Ok(val) = std::env::var("CATEX_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("CATEX_EXPORT_QUERY_CATALOG_CODES") {
        config.export.query.catalog_codes =
            parse_list("CATEX_EXPORT_QUERY_CATALOG_CODES", &val, |s| s.parse())?;
    }
    if let Ok(val) = std::env::var("CATEX_EXPORT_QUERY_STORE_CODES") {
        config.export.query.store_codes =
            parse_list("CATEX_EXPORT_QUERY_STORE_CODES", &val, |s| Ok(s.to_string()))?;
    }

    // Verification overrides
    if let Ok(val) = std::env::var("CATEX_VERIFICATION_ENABLE_VERIFICATION") {
        config.verification.enable_verification = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CATEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CATEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CATEX_TEST_SNAPSHOT", "/data/catalog.json");
        let input = "path = \"${CATEX_TEST_SNAPSHOT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"/data/catalog.json\"");
        std::env::remove_var("CATEX_TEST_SNAPSHOT");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CATEX_TEST_MISSING_VAR");
        let input = "path = \"${CATEX_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("CATEX_TEST_COMMENTED_VAR");
        let input = "# path = \"${CATEX_TEST_COMMENTED_VAR}\"\n";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_parse_list() {
        let values = parse_list("X", "product, catalog ,", |s| s.parse::<JobType>()).unwrap();
        assert_eq!(values, vec![JobType::Product, JobType::Catalog]);

        assert!(parse_list("X", "product,widget", |s| s.parse::<JobType>()).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[source]
path = "catalog.json"

[export]
job_types = ["product", "gift_certificate"]
batch_size = 50

[export.query]
catalog_codes = ["MASTER"]
store_codes = ["SNAPITUP"]

[export.dependencies]
attribute = "referenced"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.source.path, "catalog.json");
        assert_eq!(
            config.export.job_types,
            vec![JobType::Product, JobType::GiftCertificate]
        );
        assert_eq!(config.export.batch_size, 50);
        assert_eq!(config.export.output_dir, "export");
        assert_eq!(config.export.query.catalog_codes[0].as_str(), "MASTER");
    }

    #[test]
    fn test_load_config_invalid_batch_size() {
        let toml_content = r#"
[source]
path = "catalog.json"

[export]
job_types = ["catalog"]
batch_size = 0

[export.query]
catalog_codes = ["MASTER"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(CatexError::Configuration(_))));
    }
}
