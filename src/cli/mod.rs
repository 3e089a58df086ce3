//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Catex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Catex - Catalog export with dependency resolution
#[derive(Parser, Debug)]
#[command(name = "catex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "catex.toml", env = "CATEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CATEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export catalog objects and their dependencies into a bundle
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Verify a written bundle
    Verify(commands::verify::VerifyArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
