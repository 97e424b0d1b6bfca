//! Per-user resource operations.
//!
//! [`ResourceService`] is the entry point for callers: it takes an
//! authenticated [`UserId`] and raw path strings, validates them, and hands
//! the work to the catalog, transfer engine and archive builder.

use crate::archive::ArchiveBuilder;
use crate::catalog::{self, ResourceCatalog};
use crate::codec;
use crate::path::ResourcePath;
use crate::transfer::{TransferEngine, UploadFile};
use cloud_storage_core::traits::ObjectStore;
use cloud_storage_core::{
    ByteStream, Error, ResourceDescriptor, Result, StorageConfig, StoreError, UserId,
};
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

/// A file or folder ready to be sent to the user.
pub struct Download {
    /// Suggested file name (`<folder>.zip` for directories)
    pub filename: String,
    /// Content
    pub stream: ByteStream,
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Virtual filesystem over a flat object store, one private tree per user.
///
/// The service keeps no state between calls; every result reflects the
/// store at the time of the call.
///
/// # Examples
///
/// ```
/// use cloud_storage_backend::MemoryObjectStore;
/// use cloud_storage_core::{StorageConfig, UserId};
/// use cloud_storage_vfs::{ResourceService, UploadFile};
/// use std::io::Cursor;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> cloud_storage_core::Result<()> {
/// let service = ResourceService::new(
///     Arc::new(MemoryObjectStore::new()),
///     StorageConfig::default(),
/// )?;
/// service.ensure_bucket().await?;
///
/// let user = UserId::new(1);
/// let file = UploadFile::new("notes.txt", 2, Box::new(Cursor::new(b"hi".to_vec())));
/// let uploaded = service.upload(user, "", vec![file]).await?;
/// assert_eq!(uploaded[0].name, "notes.txt");
///
/// let listing = service.list_directory(user, "").await?;
/// assert_eq!(listing.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ObjectStore>,
    config: StorageConfig,
    catalog: ResourceCatalog,
    transfer: TransferEngine,
    archive: ArchiveBuilder,
}

impl fmt::Debug for ResourceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResourceService {
    /// Creates a service over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid.
    pub fn new(store: Arc<dyn ObjectStore>, config: StorageConfig) -> Result<Self> {
        config.validate()?;

        let catalog = ResourceCatalog::new(Arc::clone(&store), config.bucket.clone());
        Ok(Self {
            transfer: TransferEngine::new(catalog.clone()),
            archive: ArchiveBuilder::new(catalog.clone()),
            catalog,
            store,
            config,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the read-only catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Makes sure the configured bucket exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BucketNotFound`] (wrapped) when the bucket is
    /// missing and creation is disabled, or any store failure.
    pub async fn ensure_bucket(&self) -> Result<()> {
        let bucket = &self.config.bucket;
        if self.store.bucket_exists(bucket).await? {
            return Ok(());
        }

        if !self.config.create_bucket {
            return Err(StoreError::BucketNotFound {
                bucket: bucket.clone(),
            }
            .into());
        }

        self.store.make_bucket(bucket).await?;
        tracing::info!(bucket = %bucket, "Created bucket");
        Ok(())
    }

    /// Describes the file or directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] or [`Error::ResourceNotFound`].
    pub async fn get_resource(&self, user: UserId, path: &str) -> Result<ResourceDescriptor> {
        let path = ResourcePath::new(path)?;
        if path.is_root() {
            return Ok(ResourceDescriptor::root());
        }

        let key = codec::encode(user, path.as_str());
        if path.is_directory() {
            if !self.catalog.exists(&key).await? {
                return Err(Error::ResourceNotFound {
                    resource: path.to_string(),
                });
            }
            Ok(codec::directory_descriptor(&key))
        } else {
            let record = self.catalog.stat(&key).await?;
            Ok(codec::file_descriptor(&key, record.size))
        }
    }

    /// Lists the direct children of a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for file paths and
    /// [`Error::ResourceNotFound`] for missing non-root directories.
    pub async fn list_directory(
        &self,
        user: UserId,
        path: &str,
    ) -> Result<Vec<ResourceDescriptor>> {
        let path = ResourcePath::new(path)?;
        if !path.is_directory() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }

        let key = codec::encode(user, path.as_str());
        let records = self.catalog.list(&key, false).await?;
        if records.is_empty() && !path.is_root() {
            return Err(Error::ResourceNotFound {
                resource: path.to_string(),
            });
        }

        let mut children: Vec<_> = records
            .iter()
            .filter(|r| r.key != key)
            .map(codec::descriptor_for)
            .collect();
        catalog::sort_descriptors(&mut children);
        Ok(children)
    }

    /// Searches the user's tree for names containing `query`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] for a blank query.
    pub async fn search(&self, user: UserId, query: &str) -> Result<Vec<ResourceDescriptor>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidQuery {
                query: query.to_string(),
            });
        }
        self.catalog.search(user, query).await
    }

    /// Removes a file or a directory tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for the root or a malformed path, and
    /// [`Error::ResourceNotFound`] if nothing exists there.
    pub async fn remove(&self, user: UserId, path: &str) -> Result<()> {
        let path = resource_path(path)?;
        self.transfer.remove(user, &path).await
    }

    /// Moves or renames a file or directory.
    ///
    /// An empty `to` moves a file to the root; for a directory it only
    /// describes the directory where it is.
    ///
    /// # Errors
    ///
    /// See [`TransferEngine::move_resource`].
    pub async fn move_resource(
        &self,
        user: UserId,
        from: &str,
        to: &str,
    ) -> Result<ResourceDescriptor> {
        let from = resource_path(from)?;
        let to = ResourcePath::new(to)?;
        self.transfer.move_resource(user, &from, &to).await
    }

    /// Uploads files into the directory at `path` (`""` for the root).
    ///
    /// # Errors
    ///
    /// See [`TransferEngine::upload`].
    pub async fn upload(
        &self,
        user: UserId,
        path: &str,
        files: Vec<UploadFile>,
    ) -> Result<Vec<ResourceDescriptor>> {
        let path = ResourcePath::new(path)?;
        self.transfer.upload(user, &path, files).await
    }

    /// Creates an empty directory.
    ///
    /// # Errors
    ///
    /// See [`TransferEngine::create_empty_directory`].
    pub async fn create_directory(&self, user: UserId, path: &str) -> Result<ResourceDescriptor> {
        let path = resource_path(path)?;
        self.transfer.create_empty_directory(user, &path).await
    }

    /// Opens a file, or zips a directory, for download.
    ///
    /// The root downloads as `<root_archive_name>.zip` and may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if nothing exists at `path`.
    pub async fn download(&self, user: UserId, path: &str) -> Result<Download> {
        let path = ResourcePath::new(path)?;
        let key = codec::encode(user, path.as_str());

        if !path.is_directory() {
            let stream = self.catalog.open(&key).await?;
            return Ok(Download {
                filename: path.name().to_string(),
                stream,
            });
        }

        let records = self.catalog.list(&key, true).await?;
        if records.is_empty() && !path.is_root() {
            return Err(Error::ResourceNotFound {
                resource: path.to_string(),
            });
        }

        let bytes = self.archive.build_zip(&key, &records).await?;
        let filename = if path.is_root() {
            format!("{}.zip", self.config.root_archive_name)
        } else {
            format!("{}.zip", path.name())
        };

        tracing::info!(%user, path = %path, objects = records.len(), "Prepared folder download");
        Ok(Download {
            filename,
            stream: Box::new(Cursor::new(bytes)),
        })
    }
}

/// Parses a path that must name a concrete resource (not the root).
fn resource_path(path: &str) -> Result<ResourcePath> {
    let path = ResourcePath::new(path)?;
    if path.is_root() {
        return Err(Error::InvalidPath {
            path: String::new(),
        });
    }
    Ok(path)
}
