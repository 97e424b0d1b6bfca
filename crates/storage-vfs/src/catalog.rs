//! Read-only queries against the object store.

use crate::codec;
use cloud_storage_core::traits::ObjectStore;
use cloud_storage_core::{
    ByteStream, Error, ObjectRecord, ResourceDescriptor, Result, StoreError, UserId,
};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Read-only view of one bucket.
///
/// Cloning is cheap: the store handle is shared.
#[derive(Clone)]
pub struct ResourceCatalog {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl fmt::Debug for ResourceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCatalog")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl ResourceCatalog {
    /// Creates a catalog over `bucket`.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub(crate) fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Lists records under `prefix`. An empty result is not an error here.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn list(&self, prefix: &str, recursive: bool) -> Result<Vec<ObjectRecord>> {
        Ok(self
            .store
            .list_objects(&self.bucket, prefix, recursive)
            .await?)
    }

    /// Returns the record stored at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if nothing is stored at `key`.
    pub async fn stat(&self, key: &str) -> Result<ObjectRecord> {
        self.store
            .stat_object(&self.bucket, key)
            .await
            .map_err(|e| not_found_or(e, key))
    }

    /// Returns `true` if at least one object shares `prefix`.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn exists(&self, prefix: &str) -> Result<bool> {
        Ok(!self.list(prefix, false).await?.is_empty())
    }

    /// Opens the object at `key` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if nothing is stored at `key`.
    pub async fn open(&self, key: &str) -> Result<ByteStream> {
        self.store
            .get_object(&self.bucket, key)
            .await
            .map_err(|e| not_found_or(e, key))
    }

    /// Finds every file and directory whose name contains `query`.
    ///
    /// Matching is case-sensitive and applies to each path segment. The
    /// user's root is never returned. Directories come first, then files,
    /// each ordered by path and name.
    ///
    /// # Errors
    ///
    /// Propagates store failures; a file removed between listing and stat
    /// yields [`Error::ResourceNotFound`].
    pub async fn search(&self, user: UserId, query: &str) -> Result<Vec<ResourceDescriptor>> {
        let root = codec::user_root(user);
        let records = self.list(&root, true).await?;

        let mut matches = BTreeSet::new();
        for record in &records {
            let relative = record.key.strip_prefix(&root).unwrap_or_default();
            matches.extend(matching_prefixes(relative, query));
        }
        matches.remove("");

        let mut results = Vec::with_capacity(matches.len());
        for relative in matches {
            let key = codec::encode(user, relative);
            if relative.ends_with('/') {
                results.push(codec::directory_descriptor(&key));
            } else {
                let record = self.stat(&key).await?;
                results.push(codec::file_descriptor(&key, record.size));
            }
        }

        sort_descriptors(&mut results);
        tracing::debug!(%user, query, hits = results.len(), "Search finished");
        Ok(results)
    }
}

/// Orders descriptors directories first, then by path and name.
pub fn sort_descriptors(descriptors: &mut [ResourceDescriptor]) {
    descriptors.sort_by(|a, b| {
        (a.resource_type, &a.path, &a.name).cmp(&(b.resource_type, &b.path, &b.name))
    });
}

/// Yields the path prefix ending at each segment that contains `query`.
///
/// Directory prefixes keep their trailing `/`; a matching final segment
/// yields the whole path.
fn matching_prefixes<'a>(relative: &'a str, query: &str) -> Vec<&'a str> {
    let mut prefixes = Vec::new();
    let mut start = 0;

    for segment in relative.split('/') {
        let end = start + segment.len();
        if !segment.is_empty() && segment.contains(query) {
            let boundary = if end < relative.len() { end + 1 } else { end };
            prefixes.push(&relative[..boundary]);
        }
        start = end + 1;
    }

    prefixes
}

fn not_found_or(err: StoreError, key: &str) -> Error {
    if err.is_object_not_found() {
        Error::ResourceNotFound {
            resource: codec::relative(key).to_string(),
        }
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_prefixes_directory_and_file() {
        assert_eq!(
            matching_prefixes("notes/notes.txt", "note"),
            vec!["notes/", "notes/notes.txt"]
        );
    }

    #[test]
    fn test_matching_prefixes_skips_marker_tail() {
        assert_eq!(matching_prefixes("docs/", "doc"), vec!["docs/"]);
        assert!(matching_prefixes("", "").is_empty());
    }

    #[test]
    fn test_matching_prefixes_is_case_sensitive() {
        assert!(matching_prefixes("Docs/a.txt", "docs").is_empty());
    }

    #[test]
    fn test_matching_prefixes_middle_segment() {
        assert_eq!(matching_prefixes("a/report/b.txt", "port"), vec!["a/report/"]);
    }

    #[test]
    fn test_sort_descriptors_directories_first() {
        let mut items = vec![
            ResourceDescriptor::file("", "b.txt", 1),
            ResourceDescriptor::directory("x/", "y"),
            ResourceDescriptor::file("", "a.txt", 1),
            ResourceDescriptor::directory("", "z"),
        ];
        sort_descriptors(&mut items);

        assert_eq!(
            items,
            vec![
                ResourceDescriptor::directory("", "z"),
                ResourceDescriptor::directory("x/", "y"),
                ResourceDescriptor::file("", "a.txt", 1),
                ResourceDescriptor::file("", "b.txt", 1),
            ]
        );
    }
}
