//! Upload command implementation.
//!
//! Local files upload under their file name. Local directories upload
//! recursively under their own name, so `upload photos` stores
//! `photos/2024/a.jpg` for `photos/2024/a.jpg` on disk.

use crate::formatters::print_output;
use crate::session::Session;
use anyhow::{Context, Result};
use cloud_storage_core::ResourceDescriptor;
use cloud_storage_core::cli::{ExitCode, OutputFormat};
use cloud_storage_vfs::UploadFile;
use std::path::Path;
use tokio::fs::File;
use walkdir::WalkDir;

/// Uploads `sources` into the directory `to` and prints the new files.
pub async fn run(
    session: &Session,
    sources: &[impl AsRef<Path>],
    to: &str,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let uploaded = upload_paths(session, sources, to).await?;
    print_output(&uploaded, output_format)?;
    Ok(ExitCode::SUCCESS)
}

/// Uploads `sources` into the directory `to`.
///
/// # Errors
///
/// Returns an error if a source cannot be read or the upload is rejected.
pub async fn upload_paths(
    session: &Session,
    sources: &[impl AsRef<Path>],
    to: &str,
) -> Result<Vec<ResourceDescriptor>> {
    let mut files = Vec::new();
    for source in sources {
        files.extend(collect(source.as_ref()).await?);
    }

    let count = files.len();
    let uploaded = session.service.upload(session.user, to, files).await?;
    tracing::info!(files = count, to, "Upload complete");
    Ok(uploaded)
}

/// Opens every file under `source`, named relative to its parent.
async fn collect(source: &Path) -> Result<Vec<UploadFile>> {
    let metadata = tokio::fs::metadata(source)
        .await
        .with_context(|| format!("cannot read {}", source.display()))?;

    if metadata.is_file() {
        let name = utf8_name(source)?;
        return Ok(vec![open(source, name, metadata.len()).await?]);
    }

    let root = utf8_name(source)?;
    let mut files = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let size = entry.metadata()?.len();
        if size == 0 {
            tracing::warn!(file = %entry.path().display(), "Skipping empty file");
            continue;
        }

        let relative = entry.path().strip_prefix(source)?;
        let name = relative_name(&root, relative)?;
        files.push(open(entry.path(), name, size).await?);
    }

    Ok(files)
}

async fn open(path: &Path, name: String, size: u64) -> Result<UploadFile> {
    let file = File::open(path)
        .await
        .with_context(|| format!("cannot open {}", path.display()))?;
    tracing::debug!(file = %path.display(), name, size, "Queued upload");
    Ok(UploadFile::new(name, size, Box::new(file)))
}

fn utf8_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no usable file name", path.display()))
}

/// Joins `root` and the components of `relative` with `/`.
fn relative_name(root: &str, relative: &Path) -> Result<String> {
    let mut name = root.to_string();
    for component in relative.components() {
        let part = component
            .as_os_str()
            .to_str()
            .with_context(|| format!("{} is not valid UTF-8", relative.display()))?;
        name.push('/');
        name.push_str(part);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_relative_name_uses_forward_slashes() {
        let relative = Path::new("2024").join("a.jpg");
        assert_eq!(relative_name("photos", &relative).unwrap(), "photos/2024/a.jpg");
    }

    #[tokio::test]
    async fn test_collect_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let files = collect(&path).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "notes.txt");
        assert_eq!(files[0].size, 5);
    }

    #[tokio::test]
    async fn test_collect_directory_recursively_skipping_empty_files() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir_all(photos.join("2024")).unwrap();
        fs::write(photos.join("cover.jpg"), b"jpg").unwrap();
        fs::write(photos.join("2024").join("a.jpg"), b"aaaa").unwrap();
        fs::write(photos.join("empty.txt"), b"").unwrap();

        let files = collect(&photos).await.unwrap();
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["photos/2024/a.jpg", "photos/cover.jpg"]);
    }

    #[tokio::test]
    async fn test_collect_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        assert!(collect(&dir.path().join("nope")).await.is_err());
    }
}
