//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Typed configuration loader for the TARS-AI assistant
#[derive(Parser)]
#[command(
    name = "tars-config",
    version,
    about = "Typed configuration loader and validator for the TARS-AI assistant",
    long_about = "Reads the INI configuration of the TARS-AI voice assistant, checks every \
                  field against its declared type and constraints, and reports all problems \
                  in one pass."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also write daily-rotated log files to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configuration file and report every problem
    Check,
    /// Print the resolved configuration with secrets redacted
    Show {
        /// Print JSON instead of INI
        #[arg(long)]
        json: bool,
    },
    /// List every declared field
    Schema,
    /// Generate default configuration file
    Init {
        /// Path where to create the configuration file
        #[arg(long, short = 'p')]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Display version information
    Version,
}
