//! In-memory object store.

use crate::body::read_body;
use crate::listing;
use crate::naming::validate_bucket_name;
use async_trait::async_trait;
use cloud_storage_core::traits::ObjectStore;
use cloud_storage_core::{ByteStream, DeleteError, ObjectRecord, StoreError, StoreResult};
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use tokio::sync::RwLock;

type Bucket = BTreeMap<String, Vec<u8>>;

/// Object store keeping every bucket in memory.
///
/// Keys within a bucket are kept sorted, so prefix listings are range scans.
/// Cloning bodies on read keeps lock hold times short.
///
/// # Examples
///
/// ```
/// use cloud_storage_backend::MemoryObjectStore;
/// use cloud_storage_core::traits::ObjectStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryObjectStore::with_bucket("user-files").await?;
/// store.insert("user-files", "user-1-files/a.txt", b"abc".to_vec()).await?;
///
/// let record = store.stat_object("user-files", "user-1-files/a.txt").await?;
/// assert_eq!(record.size, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    buckets: RwLock<HashMap<String, Bucket>>,
}

impl MemoryObjectStore {
    /// Creates an empty store with no buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one empty bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket name is invalid.
    pub async fn with_bucket(bucket: &str) -> StoreResult<Self> {
        let store = Self::new();
        store.make_bucket(bucket).await?;
        Ok(store)
    }

    /// Stores `bytes` at `key` directly, bypassing the streaming API.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BucketNotFound`] if the bucket is missing.
    pub async fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        let mut buckets = self.buckets.write().await;
        let objects = bucket_mut(&mut buckets, bucket)?;
        objects.insert(key.to_string(), bytes);
        Ok(())
    }

    /// Returns a copy of the bytes stored at `key`, if any.
    pub async fn read(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let buckets = self.buckets.read().await;
        buckets.get(bucket)?.get(key).cloned()
    }

    /// Returns every key in the bucket, sorted.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn bucket_ref<'a>(buckets: &'a HashMap<String, Bucket>, bucket: &str) -> StoreResult<&'a Bucket> {
    buckets.get(bucket).ok_or_else(|| StoreError::BucketNotFound {
        bucket: bucket.to_string(),
    })
}

fn bucket_mut<'a>(
    buckets: &'a mut HashMap<String, Bucket>,
    bucket: &str,
) -> StoreResult<&'a mut Bucket> {
    buckets.get_mut(bucket).ok_or_else(|| StoreError::BucketNotFound {
        bucket: bucket.to_string(),
    })
}

fn not_found(bucket: &str, key: &str) -> StoreError {
    StoreError::ObjectNotFound {
        bucket: bucket.to_string(),
        key: key.to_string(),
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool> {
        Ok(self.buckets.read().await.contains_key(bucket))
    }

    async fn make_bucket(&self, bucket: &str) -> StoreResult<()> {
        validate_bucket_name(bucket)?;
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default();
        tracing::debug!(bucket, "Created in-memory bucket");
        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        recursive: bool,
    ) -> StoreResult<Vec<ObjectRecord>> {
        let buckets = self.buckets.read().await;
        let objects = bucket_ref(&buckets, bucket)?;

        let entries = objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, bytes)| (key.as_str(), bytes.len() as u64));

        Ok(listing::list(entries, prefix, recursive))
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectRecord> {
        let buckets = self.buckets.read().await;
        let bytes = bucket_ref(&buckets, bucket)?
            .get(key)
            .ok_or_else(|| not_found(bucket, key))?;
        Ok(ObjectRecord::new(key, bytes.len() as u64))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        stream: ByteStream,
        size: u64,
    ) -> StoreResult<()> {
        let bytes = read_body(key, stream, size).await?;
        self.insert(bucket, key, bytes).await
    }

    async fn copy_object(&self, bucket: &str, src: &str, dst: &str) -> StoreResult<()> {
        let mut buckets = self.buckets.write().await;
        let objects = bucket_mut(&mut buckets, bucket)?;
        let bytes = objects
            .get(src)
            .cloned()
            .ok_or_else(|| not_found(bucket, src))?;
        objects.insert(dst.to_string(), bytes);
        Ok(())
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let mut buckets = self.buckets.write().await;
        bucket_mut(&mut buckets, bucket)?.remove(key);
        Ok(())
    }

    async fn remove_objects(
        &self,
        bucket: &str,
        keys: &[String],
    ) -> StoreResult<Vec<DeleteError>> {
        let mut buckets = self.buckets.write().await;
        let objects = bucket_mut(&mut buckets, bucket)?;
        for key in keys {
            objects.remove(key);
        }
        Ok(Vec::new())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<ByteStream> {
        let buckets = self.buckets.read().await;
        let bytes = bucket_ref(&buckets, bucket)?
            .get(key)
            .cloned()
            .ok_or_else(|| not_found(bucket, key))?;
        Ok(Box::new(Cursor::new(bytes)))
    }
}
