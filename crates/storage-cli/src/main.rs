//! Cloud storage CLI.
//!
//! Command-line front end for per-user file trees kept in a local object
//! store.

#![allow(clippy::missing_errors_doc)]

use anyhow::Result;
use clap::Parser;
use cloud_storage_cli::cli::Cli;
use cloud_storage_cli::commands::config;
use cloud_storage_cli::runner::{execute_command, exit_code_for, init_logging};
use cloud_storage_core::cli::{ExitCode, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(ExitCode::INVALID_INPUT.as_i32());
        }
    };

    init_logging(cli.verbose, &config.general.log_level)?;

    let format = cli
        .format
        .as_deref()
        .unwrap_or(&config.general.default_format);
    let output_format = match format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(ExitCode::INVALID_INPUT.as_i32());
        }
    };

    let exit_code = match execute_command(cli.command, &cli.storage, &config, output_format).await
    {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}
