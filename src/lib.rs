// Catex - Catalog export with dependency resolution
// Copyright (c) 2025 Catex Contributors
// Licensed under the MIT License

//! # Catex - Catalog export with dependency resolution
//!
//! Catex exports objects of a commerce catalog (products, categories,
//! catalogs, gift certificates) into a self-consistent bundle: everything an
//! exported object references is exported with it.
//!
//! ## Overview
//!
//! - **Selecting** primary objects from a query (catalog codes, GUIDs, stores)
//! - **Exporting** them in chunks, with dependent objects nested in their DTOs
//! - **Registering** every referenced object in a dependency registry
//! - **Following** the registry with the exporters that own those objects
//! - **Verifying** the written bundle against its manifest
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export loop, exporters, dependents, verification)
//! - [`adapters`] - Catalog store and bundle sinks
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catex::config::load_config;
//! use catex::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("catex.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(config, shutdown_rx).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} objects", summary.total_objects());
//!     Ok(())
//! }
//! ```
//!
//! ## Dependency Modes
//!
//! Dependents of an exported catalog are selected per entity kind. In `all`
//! mode every brand, attribute or product type of the catalog is exported;
//! in `referenced` mode only those an exported object points at:
//!
//! ```toml
//! [export.dependencies]
//! default = "all"
//! brand = "referenced"
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`] with [`domain::CatexError`].
//! Failures of single objects never abort a job; they are recorded in the
//! [`core::export::Summary`] with a message code and the job goes on.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
