//! Local-directory object store.
//!
//! Each bucket is a directory under the data directory. Each object is a
//! pair of files named after the hash of its key: the raw bytes and a small
//! JSON record holding the original key and size. An object exists exactly
//! when its metadata file exists.

use crate::body::check_length;
use crate::listing;
use crate::naming::{object_stem, validate_bucket_name};
use async_trait::async_trait;
use cloud_storage_core::traits::ObjectStore;
use cloud_storage_core::{ByteStream, DeleteError, ObjectRecord, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

/// Directory for in-flight writes, inside the data directory.
const TMP_DIR: &str = ".tmp";

/// Extension of object byte files.
const DATA_EXT: &str = "data";

/// Suffix of object metadata files.
const META_SUFFIX: &str = ".meta.json";

/// Chunk size for streaming uploads to disk.
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Serialize, Deserialize)]
struct ObjectMeta {
    key: String,
    size: u64,
}

/// Object store persisted under a local data directory.
///
/// # Thread Safety
///
/// `FsObjectStore` is `Send + Sync`. Writes land in a temporary file and
/// are renamed into place, so readers never observe a half-written body.
/// Concurrent writers to the same key race; the last rename wins.
///
/// # Examples
///
/// ```no_run
/// use cloud_storage_backend::FsObjectStore;
/// use cloud_storage_core::traits::ObjectStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FsObjectStore::new("./data")?;
/// store.make_bucket("user-files").await?;
///
/// let records = store.list_objects("user-files", "user-1-files/", false).await?;
/// println!("{} entries", records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    base_dir: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at `base_dir`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        if !base_dir.exists() {
            std::fs::create_dir_all(&base_dir)?;
            tracing::debug!("Created object store directory: {}", base_dir.display());
        }
        std::fs::create_dir_all(base_dir.join(TMP_DIR))?;

        Ok(Self { base_dir })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.base_dir.join(bucket)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_dir
            .join(TMP_DIR)
            .join(format!("{}.part", Uuid::new_v4()))
    }

    /// Resolves an existing bucket directory.
    async fn existing_bucket(&self, bucket: &str) -> StoreResult<PathBuf> {
        validate_bucket_name(bucket)?;
        let path = self.bucket_path(bucket);

        if is_dir(&path).await? {
            Ok(path)
        } else {
            Err(StoreError::BucketNotFound {
                bucket: bucket.to_string(),
            })
        }
    }

    async fn read_meta(bucket: &str, dir: &Path, key: &str) -> StoreResult<ObjectMeta> {
        match fs::read(meta_path(dir, key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Moves a finished temp body into place and records its metadata.
    async fn commit(&self, dir: &Path, temp: &Path, key: &str, size: u64) -> StoreResult<()> {
        fs::rename(temp, data_path(dir, key)).await?;

        let meta = serde_json::to_vec(&ObjectMeta {
            key: key.to_string(),
            size,
        })?;
        let temp_meta = self.temp_path();
        fs::write(&temp_meta, meta).await?;
        fs::rename(&temp_meta, meta_path(dir, key)).await?;
        Ok(())
    }

    /// Streams `stream` into `temp`, returning the number of bytes written.
    async fn spool(key: &str, mut stream: ByteStream, temp: &Path) -> StoreResult<u64> {
        let mut file = fs::File::create(temp).await?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut written = 0u64;

        loop {
            let n = stream
                .read(&mut buf)
                .await
                .map_err(|source| StoreError::Body {
                    key: key.to_string(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n]).await?;
            written += n as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}

fn data_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{DATA_EXT}", object_stem(key)))
}

fn meta_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}{META_SUFFIX}", object_stem(key)))
}

async fn is_dir(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool> {
        validate_bucket_name(bucket)?;
        is_dir(&self.bucket_path(bucket)).await
    }

    async fn make_bucket(&self, bucket: &str) -> StoreResult<()> {
        validate_bucket_name(bucket)?;
        let path = self.bucket_path(bucket);
        fs::create_dir_all(&path).await?;
        tracing::info!("Created bucket directory: {}", path.display());
        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        recursive: bool,
    ) -> StoreResult<Vec<ObjectRecord>> {
        let dir = self.existing_bucket(bucket).await?;
        let mut metas = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if !name.to_string_lossy().ends_with(META_SUFFIX) {
                continue;
            }

            let bytes = match fs::read(entry.path()).await {
                Ok(bytes) => bytes,
                // removed between read_dir and read
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            let meta: ObjectMeta = serde_json::from_slice(&bytes)?;
            if meta.key.starts_with(prefix) {
                metas.push(meta);
            }
        }

        Ok(listing::list(
            metas.iter().map(|m| (m.key.as_str(), m.size)),
            prefix,
            recursive,
        ))
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectRecord> {
        let dir = self.existing_bucket(bucket).await?;
        let meta = Self::read_meta(bucket, &dir, key).await?;
        Ok(ObjectRecord::new(meta.key, meta.size))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        stream: ByteStream,
        size: u64,
    ) -> StoreResult<()> {
        let dir = self.existing_bucket(bucket).await?;
        let temp = self.temp_path();

        let written = match Self::spool(key, stream, &temp).await {
            Ok(written) => written,
            Err(e) => {
                remove_if_exists(&temp).await?;
                return Err(e);
            }
        };
        if let Err(e) = check_length(key, written, size) {
            remove_if_exists(&temp).await?;
            return Err(e);
        }

        self.commit(&dir, &temp, key, written).await?;
        tracing::debug!(key, size = written, "Stored object");
        Ok(())
    }

    async fn copy_object(&self, bucket: &str, src: &str, dst: &str) -> StoreResult<()> {
        let dir = self.existing_bucket(bucket).await?;
        let meta = Self::read_meta(bucket, &dir, src).await?;

        let temp = self.temp_path();
        fs::copy(data_path(&dir, src), &temp).await?;
        self.commit(&dir, &temp, dst, meta.size).await?;

        tracing::debug!(src, dst, "Copied object");
        Ok(())
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let dir = self.existing_bucket(bucket).await?;
        remove_if_exists(&meta_path(&dir, key)).await?;
        remove_if_exists(&data_path(&dir, key)).await?;
        Ok(())
    }

    async fn remove_objects(
        &self,
        bucket: &str,
        keys: &[String],
    ) -> StoreResult<Vec<DeleteError>> {
        self.existing_bucket(bucket).await?;
        let mut errors = Vec::new();

        for key in keys {
            if let Err(e) = self.remove_object(bucket, key).await {
                errors.push(DeleteError {
                    key: key.clone(),
                    message: e.to_string(),
                });
            }
        }

        Ok(errors)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<ByteStream> {
        let dir = self.existing_bucket(bucket).await?;
        Self::read_meta(bucket, &dir, key).await?;
        let file = fs::File::open(data_path(&dir, key)).await?;
        Ok(Box::new(file))
    }
}
