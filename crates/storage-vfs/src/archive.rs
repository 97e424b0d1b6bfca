//! Zip assembly for folder downloads.

use crate::catalog::ResourceCatalog;
use cloud_storage_core::{Error, ObjectRecord, Result, StoreError};
use std::io::{Cursor, Write};
use tokio::io::AsyncReadExt;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;
use zip::{ZipWriter, result::ZipError};

/// Streams objects under a key prefix into an in-memory zip archive.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    catalog: ResourceCatalog,
}

impl ArchiveBuilder {
    /// Creates a builder reading through `catalog`.
    #[must_use]
    pub const fn new(catalog: ResourceCatalog) -> Self {
        Self { catalog }
    }

    /// Builds a zip of `objects`, naming entries relative to `base_path`.
    ///
    /// Keys ending in `/` become directory entries. The entry for
    /// `base_path` itself is skipped.
    ///
    /// # Errors
    ///
    /// Aborts with the first failure: a missing object yields
    /// [`Error::ResourceNotFound`], a read failure yields [`Error::Store`],
    /// and a zip encoding failure yields [`Error::Archive`]. No truncated
    /// archive is ever returned.
    pub async fn build_zip(&self, base_path: &str, objects: &[ObjectRecord]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut entries = 0usize;

        for object in objects {
            let name = entry_name(&object.key, base_path);
            if name.is_empty() {
                continue;
            }

            if name.ends_with('/') {
                writer.add_directory(name, options).map_err(archive_error)?;
            } else {
                let bytes = self.read_object(&object.key).await?;
                writer.start_file(name, options).map_err(archive_error)?;
                writer.write_all(&bytes).map_err(|e| archive_error(e.into()))?;
            }
            entries += 1;
            tracing::debug!(entry = name, "Added archive entry");
        }

        let bytes = writer.finish().map_err(archive_error)?.into_inner();
        tracing::debug!(base_path, entries, size = bytes.len(), "Archive finished");
        Ok(bytes)
    }

    async fn read_object(&self, key: &str) -> Result<Vec<u8>> {
        let mut stream = self.catalog.open(key).await?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .await
            .map_err(StoreError::from)?;
        Ok(bytes)
    }
}

/// Returns the zip entry name for `key`: everything after `base_path`.
fn entry_name<'a>(key: &'a str, base_path: &str) -> &'a str {
    key.find(base_path)
        .map_or(key, |start| &key[start + base_path.len()..])
}

#[allow(clippy::needless_pass_by_value)]
fn archive_error(err: ZipError) -> Error {
    Error::Archive {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_strips_base_path() {
        assert_eq!(entry_name("user-1-files/docs/a.txt", "user-1-files/docs/"), "a.txt");
        assert_eq!(entry_name("user-1-files/docs/x/", "user-1-files/docs/"), "x/");
        assert_eq!(entry_name("user-1-files/docs/", "user-1-files/docs/"), "");
    }

    #[test]
    fn test_entry_name_without_base_keeps_key() {
        assert_eq!(entry_name("other/a.txt", "user-1-files/"), "other/a.txt");
    }
}
