//! Mutating operations: remove, move, upload and directory creation.
//!
//! The store has no transactions. Multi-object operations run as an ordered
//! sequence of single copies followed by single deletes; a failure partway
//! leaves whatever was already done in place and is logged as a warning.

use crate::catalog::ResourceCatalog;
use crate::codec;
use crate::path::ResourcePath;
use crate::semantics::{self, Operation};
use cloud_storage_core::{
    ByteStream, Error, ResourceDescriptor, Result, StoreError, UserId,
};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A file supplied for upload.
///
/// `filename` is relative to the target directory and may contain `/` to
/// upload into nested folders.
pub struct UploadFile {
    /// Relative file name
    pub filename: String,
    /// Declared body size in bytes
    pub size: u64,
    /// File body
    pub stream: ByteStream,
}

impl UploadFile {
    /// Creates an upload item.
    #[must_use]
    pub fn new(filename: impl Into<String>, size: u64, stream: ByteStream) -> Self {
        Self {
            filename: filename.into(),
            size,
            stream,
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// An upload resolved to its destination key.
struct UploadItem {
    key: String,
    stream: ByteStream,
    size: u64,
}

/// Executes mutations against one bucket.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    catalog: ResourceCatalog,
}

impl TransferEngine {
    /// Creates an engine driving the catalog's store.
    #[must_use]
    pub const fn new(catalog: ResourceCatalog) -> Self {
        Self { catalog }
    }

    /// Removes a file, or a directory with everything under it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if nothing exists at `path`.
    pub async fn remove(&self, user: UserId, path: &ResourcePath) -> Result<()> {
        let key = codec::encode(user, path.as_str());

        if path.is_directory() {
            let records = self.catalog.list(&key, true).await?;
            if records.is_empty() {
                return Err(not_found(path.as_str()));
            }
            let keys: Vec<String> = records.into_iter().map(|r| r.key).collect();
            self.remove_keys(&keys).await?;
            tracing::info!(%user, path = %path, objects = keys.len(), "Removed directory");
        } else {
            self.catalog.stat(&key).await?;
            self.catalog
                .store()
                .remove_object(self.catalog.bucket(), &key)
                .await?;
            tracing::info!(%user, path = %path, "Removed file");
        }

        Ok(())
    }

    /// Moves or renames a file or directory.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOperation`] if the pair is neither a move nor a rename
    /// - [`Error::ResourceNotFound`] if the source does not exist
    /// - [`Error::ResourceAlreadyExists`] if the destination is taken
    pub async fn move_resource(
        &self,
        user: UserId,
        from: &ResourcePath,
        to: &ResourcePath,
    ) -> Result<ResourceDescriptor> {
        if from.is_directory() {
            self.move_directory(user, from, to).await
        } else {
            self.move_file(user, from, to).await
        }
    }

    async fn move_file(
        &self,
        user: UserId,
        from: &ResourcePath,
        to: &ResourcePath,
    ) -> Result<ResourceDescriptor> {
        let from_key = codec::encode(user, from.as_str());

        let dest_key = match semantics::classify(from.as_str(), to.as_str()) {
            Operation::MoveToRoot => {
                let root = codec::user_root(user);
                let dest_key = format!("{root}{}", from.name());
                let top_level = self.catalog.list(&root, false).await?;
                if top_level.iter().any(|r| r.key == dest_key) {
                    return Err(already_exists(from.name()));
                }
                dest_key
            }
            Operation::Rename | Operation::Move => {
                let dest_key = codec::encode(user, to.as_str());
                let dest_dir = codec::encode(user, to.parent());
                let siblings = self.catalog.list(&dest_dir, false).await?;
                if siblings.iter().any(|r| r.key == dest_key) {
                    return Err(already_exists(to.as_str()));
                }
                dest_key
            }
            Operation::Invalid => return Err(invalid_operation(from, to)),
        };

        let record = self.catalog.stat(&from_key).await?;
        self.copy(&from_key, &dest_key).await?;
        if let Err(e) = self.delete(&from_key).await {
            tracing::warn!(
                src = %from_key,
                dst = %dest_key,
                "File copied but source not removed: {e}"
            );
            return Err(e);
        }

        tracing::info!(%user, from = %from, to = %to, "Moved file");
        Ok(codec::file_descriptor(&dest_key, record.size))
    }

    async fn move_directory(
        &self,
        user: UserId,
        from: &ResourcePath,
        to: &ResourcePath,
    ) -> Result<ResourceDescriptor> {
        let from_key = codec::encode(user, from.as_str());

        match semantics::classify(from.as_str(), to.as_str()) {
            Operation::MoveToRoot => {
                if !self.catalog.exists(&from_key).await? {
                    return Err(not_found(from.as_str()));
                }
                return Ok(codec::directory_descriptor(&from_key));
            }
            Operation::Invalid => return Err(invalid_operation(from, to)),
            Operation::Rename | Operation::Move => {}
        }

        let to_key = codec::encode(user, to.as_str());
        if to_key.starts_with(&from_key) {
            return Err(invalid_operation(from, to));
        }

        let records = self.catalog.list(&from_key, true).await?;
        if records.is_empty() {
            return Err(not_found(from.as_str()));
        }

        let sources: HashSet<&str> = records.iter().map(|r| r.key.as_str()).collect();
        let pairs: Vec<(&str, String)> = records
            .iter()
            .map(|r| {
                let suffix = &r.key[from_key.len()..];
                (r.key.as_str(), format!("{to_key}{suffix}"))
            })
            .collect();

        if let Some((_, taken)) = pairs.iter().find(|(_, dst)| sources.contains(dst.as_str())) {
            return Err(already_exists(codec::relative(taken)));
        }

        for (copied, (src, dst)) in pairs.iter().enumerate() {
            if let Err(e) = self.copy(src, dst).await {
                tracing::warn!(
                    from = %from,
                    to = %to,
                    copied,
                    total = pairs.len(),
                    "Directory move aborted during copy: {e}"
                );
                return Err(e);
            }
        }

        let originals: Vec<String> = pairs.iter().map(|(src, _)| (*src).to_string()).collect();
        if let Err(e) = self.remove_keys(&originals).await {
            tracing::warn!(
                from = %from,
                to = %to,
                "Directory copied but originals not fully removed: {e}"
            );
            return Err(e);
        }

        tracing::info!(%user, from = %from, to = %to, objects = pairs.len(), "Moved directory");
        Ok(codec::directory_descriptor(&to_key))
    }

    /// Uploads files into the directory at `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if `path` is not a directory
    /// - [`Error::InvalidRequestBody`] for an empty list, an empty file, a
    ///   bad or duplicate file name, or an unreadable body
    /// - [`Error::ResourceAlreadyExists`] if any destination key is taken
    pub async fn upload(
        &self,
        user: UserId,
        path: &ResourcePath,
        files: Vec<UploadFile>,
    ) -> Result<Vec<ResourceDescriptor>> {
        if !path.is_directory() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }
        if files.is_empty() {
            return Err(invalid_body("no files supplied"));
        }

        let base = codec::encode(user, path.as_str());
        let mut items = Vec::with_capacity(files.len());
        let mut seen = HashSet::new();

        for file in files {
            validate_upload(&file)?;
            if !seen.insert(file.filename.clone()) {
                return Err(invalid_body(format!(
                    "duplicate file name '{}'",
                    file.filename
                )));
            }
            items.push(UploadItem {
                key: format!("{base}{}", file.filename),
                stream: file.stream,
                size: file.size,
            });
        }

        let parents: BTreeSet<&str> = items
            .iter()
            .map(|item| semantics::dir_of(&item.key))
            .collect();

        let mut existing = HashSet::new();
        for parent in parents {
            for record in self.catalog.list(parent, true).await? {
                existing.insert(record.key);
            }
        }

        if let Some(taken) = items.iter().find(|item| existing.contains(&item.key)) {
            return Err(already_exists(codec::relative(&taken.key)));
        }

        let total = items.len();
        let mut uploaded = Vec::with_capacity(total);
        for item in items {
            let result = self
                .catalog
                .store()
                .put_object(self.catalog.bucket(), &item.key, item.stream, item.size)
                .await;

            if let Err(e) = result {
                tracing::warn!(
                    %user,
                    path = %path,
                    uploaded = uploaded.len(),
                    total,
                    "Upload aborted: {e}"
                );
                return Err(match e {
                    StoreError::Body { key, source } => invalid_body(format!(
                        "unreadable stream for '{}': {source}",
                        codec::relative(&key)
                    )),
                    other => other.into(),
                });
            }

            tracing::debug!(key = %item.key, size = item.size, "Stored upload");
            uploaded.push(codec::file_descriptor(&item.key, item.size));
        }

        tracing::info!(%user, path = %path, files = uploaded.len(), "Uploaded files");
        Ok(uploaded)
    }

    /// Creates an empty directory by writing a zero-length marker object.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if `path` is the root or not a directory
    /// - [`Error::DirectoryAlreadyExists`] if the directory has content
    /// - [`Error::ParentDirectoryNotFound`] if the parent is missing
    pub async fn create_empty_directory(
        &self,
        user: UserId,
        path: &ResourcePath,
    ) -> Result<ResourceDescriptor> {
        if path.is_root() || !path.is_directory() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }

        let key = codec::encode(user, path.as_str());
        if self.catalog.exists(&key).await? {
            return Err(Error::DirectoryAlreadyExists {
                path: path.to_string(),
            });
        }

        let parent = path.parent();
        if !parent.is_empty() && !self.catalog.exists(&codec::encode(user, parent)).await? {
            return Err(Error::ParentDirectoryNotFound {
                path: path.to_string(),
            });
        }

        self.catalog
            .store()
            .put_object(self.catalog.bucket(), &key, Box::new(tokio::io::empty()), 0)
            .await?;

        tracing::info!(%user, path = %path, "Created directory");
        Ok(codec::directory_descriptor(&key))
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        tracing::debug!(src, dst, "Copying object");
        self.catalog
            .store()
            .copy_object(self.catalog.bucket(), src, dst)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "Removing object");
        self.catalog
            .store()
            .remove_object(self.catalog.bucket(), key)
            .await?;
        Ok(())
    }

    async fn remove_keys(&self, keys: &[String]) -> Result<()> {
        tracing::debug!(count = keys.len(), "Removing objects");
        let errors = self
            .catalog
            .store()
            .remove_objects(self.catalog.bucket(), keys)
            .await?;

        match errors.first() {
            None => Ok(()),
            Some(first) => {
                tracing::warn!(
                    failed = errors.len(),
                    total = keys.len(),
                    "Bulk removal left objects behind"
                );
                Err(StoreError::Backend {
                    message: format!(
                        "failed to remove {} of {} objects, first {}: {}",
                        errors.len(),
                        keys.len(),
                        first.key,
                        first.message
                    ),
                }
                .into())
            }
        }
    }
}

fn validate_upload(file: &UploadFile) -> Result<()> {
    let name = file.filename.as_str();

    if name.trim().is_empty() || !semantics::is_valid(name) || semantics::is_directory(name) {
        return Err(invalid_body(format!("invalid file name '{name}'")));
    }
    if file.size == 0 {
        return Err(invalid_body(format!("file '{name}' is empty")));
    }

    Ok(())
}

fn not_found(path: &str) -> Error {
    Error::ResourceNotFound {
        resource: path.to_string(),
    }
}

fn already_exists(path: &str) -> Error {
    Error::ResourceAlreadyExists {
        resource: path.to_string(),
    }
}

fn invalid_operation(from: &ResourcePath, to: &ResourcePath) -> Error {
    Error::InvalidOperation {
        from: from.to_string(),
        to: to.to_string(),
    }
}

fn invalid_body(reason: impl Into<String>) -> Error {
    Error::InvalidRequestBody {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn upload(name: &str, bytes: &[u8]) -> UploadFile {
        UploadFile::new(name, bytes.len() as u64, Box::new(Cursor::new(bytes.to_vec())))
    }

    #[test]
    fn test_validate_upload_accepts_nested_names() {
        assert!(validate_upload(&upload("a/b.txt", b"x")).is_ok());
    }

    #[test]
    fn test_validate_upload_rejects_zero_bytes() {
        let err = validate_upload(&upload("a.txt", b"")).unwrap_err();
        assert!(matches!(err, Error::InvalidRequestBody { .. }));
    }

    #[test]
    fn test_validate_upload_rejects_bad_names() {
        for name in ["", "  ", "/abs.txt", "../x.txt", "a//b.txt", "dir/"] {
            let err = validate_upload(&upload(name, b"x")).unwrap_err();
            assert!(matches!(err, Error::InvalidRequestBody { .. }), "{name}");
        }
    }

    #[test]
    fn test_upload_file_debug_hides_stream() {
        let debug = format!("{:?}", upload("a.txt", b"abc"));
        assert!(debug.contains("a.txt"));
        assert!(debug.contains("size: 3"));
    }
}
