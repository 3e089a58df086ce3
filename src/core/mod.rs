//! Core business logic for Catex.
//!
//! # Modules
//!
//! - [`export`] - Export loop, dependency registry, coordination and summary
//! - [`exporters`] - Primary exporters, one per job type
//! - [`dependent`] - Dependent exporters bound into their primary objects
//! - [`transform`] - Domain to DTO adapters
//! - [`verification`] - Bundle verification with checksums
//!
//! # Export Workflow
//!
//! 1. **Select**: Resolve the configured query to primary object GUIDs
//! 2. **Export**: Fetch primaries in chunks, adapt them to DTOs and bind
//!    their dependents
//! 3. **Register**: Record every object the primaries reference
//! 4. **Follow**: Run the exporters owning the registered kinds
//! 5. **Bundle**: Write one document per job type plus a manifest
//! 6. **Verify** (optional): Re-read the bundle and check its closure
//!
//! # Example
//!
//! ```rust,no_run
//! use catex::config::load_config;
//! use catex::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("catex.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::new(config, shutdown_rx).await?;
//!
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Exported: {}", summary.total_objects());
//! println!("Failures: {}", summary.failures.len());
//! # Ok(())
//! # }
//! ```

pub mod dependent;
pub mod export;
pub mod exporters;
pub mod transform;
pub mod verification;
