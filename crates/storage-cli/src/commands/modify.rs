//! Mutating commands: `rm`, `mv` and `mkdir`.

use crate::formatters::print_output;
use crate::session::Session;
use anyhow::Result;
use cloud_storage_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;

/// Result of a removal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RemoveResult {
    /// Removed path
    pub removed: String,
}

/// Removes the file or directory tree at `path`.
pub async fn remove(session: &Session, path: &str, output_format: OutputFormat) -> Result<ExitCode> {
    session.service.remove(session.user, path).await?;
    print_output(
        &RemoveResult {
            removed: path.to_string(),
        },
        output_format,
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Moves or renames `from` to `to` and prints the new descriptor.
pub async fn move_resource(
    session: &Session,
    from: &str,
    to: &str,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let moved = session.service.move_resource(session.user, from, to).await?;
    print_output(&moved, output_format)?;
    Ok(ExitCode::SUCCESS)
}

/// Creates an empty directory at `path`.
pub async fn make_directory(
    session: &Session,
    path: &str,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let created = session.service.create_directory(session.user, path).await?;
    print_output(&created, output_format)?;
    Ok(ExitCode::SUCCESS)
}
