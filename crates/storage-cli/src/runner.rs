//! Command execution and runtime logic.
//!
//! Contains the command dispatch, logging initialization and the mapping
//! from errors to exit codes.

use anyhow::Result;
use cloud_storage_core::cli::{ExitCode, OutputFormat};
use cloud_storage_core::{Error, StoreError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Commands, StorageArgs};
use crate::commands;
use crate::commands::config::Config;
use crate::session::Session;

/// Initializes logging infrastructure.
///
/// `verbose` forces debug level; otherwise `RUST_LOG` wins over
/// `default_level`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool, default_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub async fn execute_command(
    command: Commands,
    storage: &StorageArgs,
    config: &Config,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::Stat { path } => {
            let session = Session::open(config, storage).await?;
            commands::browse::stat(&session, &path, output_format).await
        }
        Commands::Ls { path } => {
            let session = Session::open(config, storage).await?;
            commands::browse::list(&session, &path, output_format).await
        }
        Commands::Search { query } => {
            let session = Session::open(config, storage).await?;
            commands::browse::search(&session, &query, output_format).await
        }
        Commands::Rm { path } => {
            let session = Session::open(config, storage).await?;
            commands::modify::remove(&session, &path, output_format).await
        }
        Commands::Mv { from, to } => {
            let session = Session::open(config, storage).await?;
            commands::modify::move_resource(&session, &from, &to, output_format).await
        }
        Commands::Mkdir { path } => {
            let session = Session::open(config, storage).await?;
            commands::modify::make_directory(&session, &path, output_format).await
        }
        Commands::Upload { sources, to } => {
            let session = Session::open(config, storage).await?;
            commands::upload::run(&session, &sources, &to, output_format).await
        }
        Commands::Download { path, output } => {
            let session = Session::open(config, storage).await?;
            commands::download::run(&session, &path, &output, output_format).await
        }
        Commands::Config { action } => commands::config::run(action, output_format).await,
        Commands::Completions { shell } => {
            use crate::cli::Cli;
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}

/// Picks the exit code for a failed command.
///
/// Storage errors keep their meaning (invalid input, not found, conflict);
/// everything else is a generic failure.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(err) = err.downcast_ref::<Error>() {
        return ExitCode::from_error(err);
    }
    if let Some(err) = err.downcast_ref::<StoreError>() {
        return if err.is_object_not_found() {
            ExitCode::NOT_FOUND
        } else {
            ExitCode::ERROR
        };
    }
    ExitCode::ERROR
}
