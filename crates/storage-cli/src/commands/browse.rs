//! Read-only commands: `stat`, `ls` and `search`.

use crate::formatters::print_output;
use crate::session::Session;
use anyhow::Result;
use cloud_storage_core::cli::{ExitCode, OutputFormat};

/// Describes the resource at `path`.
pub async fn stat(session: &Session, path: &str, output_format: OutputFormat) -> Result<ExitCode> {
    let resource = session.service.get_resource(session.user, path).await?;
    print_output(&resource, output_format)?;
    Ok(ExitCode::SUCCESS)
}

/// Lists the direct children of the directory at `path`.
pub async fn list(session: &Session, path: &str, output_format: OutputFormat) -> Result<ExitCode> {
    let children = session.service.list_directory(session.user, path).await?;
    print_output(&children, output_format)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints every resource whose name contains `query`.
pub async fn search(
    session: &Session,
    query: &str,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let found = session.service.search(session.user, query).await?;
    tracing::debug!(query, matches = found.len(), "Search finished");
    print_output(&found, output_format)?;
    Ok(ExitCode::SUCCESS)
}
