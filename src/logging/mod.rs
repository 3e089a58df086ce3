//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human readable console output
//! - JSON lines in a rolling local file (optional)
//! - Log level from configuration, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use catex::logging::init_logging;
//! use catex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(job_type = "product", "Exporter started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export job
///
/// # Example
///
/// ```no_run
/// use catex::log_export_start;
/// use catex::domain::kinds::JobType;
///
/// let job_id = uuid::Uuid::new_v4();
/// log_export_start!(job_id, vec![JobType::Product], false);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($job_id:expr, $job_types:expr, $dry_run:expr) => {
        tracing::info!(
            job_id = %$job_id,
            job_types = ?$job_types,
            dry_run = $dry_run,
            "Starting export"
        );
    };
}

/// Log the completion of an export job from its summary
///
/// # Example
///
/// ```no_run
/// use catex::log_export_complete;
/// use catex::core::export::Summary;
///
/// let job_id = uuid::Uuid::new_v4();
/// let summary = Summary::new();
/// log_export_complete!(job_id, summary);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($job_id:expr, $summary:expr) => {
        tracing::info!(
            job_id = %$job_id,
            objects = $summary.total_objects(),
            successful = $summary.is_successful(),
            duration_ms = $summary.duration.as_millis() as u64,
            "Export job finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use catex::log_error_with_context;
/// use catex::domain::CatexError;
///
/// let error = CatexError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through the chunks of an exporter
///
/// # Example
///
/// ```no_run
/// use catex::log_chunk_processing;
/// use catex::domain::kinds::JobType;
///
/// log_chunk_processing!(JobType::Product, 100, 1000);
/// ```
#[macro_export]
macro_rules! log_chunk_processing {
    ($job_type:expr, $current:expr, $total:expr) => {
        tracing::debug!(
            job_type = %$job_type,
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing chunk"
        );
    };
}
