//! CLI command definitions for wizard-env
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod resolve;

use crate::config::DEFAULT_ENV_FILE;
use crate::resources::DEFAULT_PREFIX;
use clap::{Parser, Subcommand, ValueEnum};
use resolve::ResolveArgs;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines (default)
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Inspect the typed configuration and resource index of a wizard application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the KEY=VALUE configuration file
    #[arg(short, long, default_value = DEFAULT_ENV_FILE, global = true)]
    pub env_file: String,

    /// Key prefix for resource category declarations
    #[arg(long, default_value = DEFAULT_PREFIX, global = true)]
    pub resource_prefix: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging (overrides LOG_LEVEL)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the typed configuration map (default if no subcommand given)
    Show,

    /// Fail if the configuration file is missing or any key kept its raw value
    Check,

    /// List resource categories and their indexed files
    Resources,

    /// Resolve a name or path within a resource category
    Resolve(ResolveArgs),
}
