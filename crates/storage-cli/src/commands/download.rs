//! Download command implementation.

use crate::formatters::print_output;
use crate::session::Session;
use anyhow::{Context, Result};
use cloud_storage_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{self, AsyncWriteExt};

/// Where a download was written.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadResult {
    /// Local file path
    pub path: PathBuf,
    /// Bytes written
    pub bytes: u64,
}

/// Downloads `path` into `output_dir` and prints where it went.
pub async fn run(
    session: &Session,
    path: &str,
    output_dir: &Path,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let result = download_to(session, path, output_dir).await?;
    print_output(&result, output_format)?;
    Ok(ExitCode::SUCCESS)
}

/// Writes the file at `path`, or a zip of the directory at `path`, into
/// `output_dir`. An existing file with the same name is replaced.
///
/// # Errors
///
/// Returns an error if the resource is missing or the local write fails.
pub async fn download_to(session: &Session, path: &str, output_dir: &Path) -> Result<DownloadResult> {
    let mut download = session.service.download(session.user, path).await?;

    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("cannot create {}", output_dir.display()))?;
    let target = output_dir.join(&download.filename);

    let mut file = File::create(&target)
        .await
        .with_context(|| format!("cannot create {}", target.display()))?;
    let bytes = io::copy(&mut download.stream, &mut file)
        .await
        .with_context(|| format!("failed writing {}", target.display()))?;
    file.flush().await?;

    tracing::info!(path, target = %target.display(), bytes, "Download written");
    Ok(DownloadResult { path: target, bytes })
}
