//! tars-config: configuration front end for the TARS-AI assistant
//!
//! Loads the assistant's INI configuration into an immutable, validated
//! snapshot and reports every problem in one pass.

mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use tars_config::config::{tars_schema, ConfigService};
use tars_config::domain::logger::{self, LogOptions};
use tars_config::service::ReportService;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logger::init(&LogOptions {
        debug: cli.debug,
        log_dir: cli.log_dir.clone(),
    })?;

    let schema = tars_schema()?;

    // Execute command
    match cli.command {
        Commands::Check => match ConfigService::load(cli.config.as_deref(), &schema) {
            Ok(snapshot) => {
                if !cli.quiet {
                    eprintln!("{}", ReportService::success(&snapshot));
                }
            }
            Err(e) => {
                eprintln!("{}", ReportService::failure(&e));
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Show { json } => {
            let snapshot = match ConfigService::load(cli.config.as_deref(), &schema) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    eprintln!("{}", ReportService::failure(&e));
                    return Ok(ExitCode::FAILURE);
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.to_redacted_json())?);
            } else {
                print!("{}", snapshot);
            }
        }
        Commands::Schema => {
            print!("{}", ReportService::schema(&schema));
        }
        Commands::Init { path, force } => {
            let config_path = if let Some(p) = path {
                ConfigService::generate_at(&p, force)?;
                p
            } else {
                ConfigService::generate_default(force)?
            };
            if !cli.quiet {
                eprintln!("Configuration file created at: {}", config_path.display());
            }
        }
        Commands::Version => {
            println!("tars-config {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(ExitCode::SUCCESS)
}
