//! Object store collaborator trait.
//!
//! The storage core never talks to a concrete backend; it is handed an
//! implementation of [`ObjectStore`] and drives it through these calls only.

use crate::{ByteStream, DeleteError, ObjectRecord, StoreResult};
use async_trait::async_trait;

/// A flat key-value object store with prefix listing.
///
/// The store has no notion of directories, atomic rename, or move. Keys are
/// opaque strings; `/` only matters to [`list_objects`](Self::list_objects).
///
/// # Listing contract
///
/// - Results are ordered lexicographically by key.
/// - `recursive = true` returns every object whose key starts with `prefix`.
/// - `recursive = false` returns objects directly under `prefix` plus one
///   synthetic record per common prefix (key ending in `/`, size 0) for
///   deeper keys. An object whose key equals `prefix` is returned as itself.
///
/// # Type Safety
///
/// All implementations must be `Send + Sync` to work with Tokio's async runtime.
///
/// # Examples
///
/// ```no_run
/// # use cloud_storage_core::traits::ObjectStore;
/// # use cloud_storage_core::StoreResult;
/// # async fn example(store: &dyn ObjectStore) -> StoreResult<()> {
/// if !store.bucket_exists("user-files").await? {
///     store.make_bucket("user-files").await?;
/// }
///
/// for record in store.list_objects("user-files", "user-1-files/", false).await? {
///     println!("{} ({} bytes)", record.key, record.size);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns `true` if the bucket exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    async fn bucket_exists(&self, bucket: &str) -> StoreResult<bool>;

    /// Creates a bucket. Creating an existing bucket is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket name is rejected or creation fails.
    async fn make_bucket(&self, bucket: &str) -> StoreResult<()>;

    /// Lists objects under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BucketNotFound`](crate::StoreError::BucketNotFound)
    /// if the bucket is missing, or a backend error.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        recursive: bool,
    ) -> StoreResult<Vec<ObjectRecord>>;

    /// Returns the record for a single key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectNotFound`](crate::StoreError::ObjectNotFound)
    /// if no object exists at `key`.
    async fn stat_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectRecord>;

    /// Stores `size` bytes read from `stream` at `key`, replacing any
    /// existing object.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Body`](crate::StoreError::Body) if the stream
    /// cannot be read, or a backend error.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        stream: ByteStream,
        size: u64,
    ) -> StoreResult<()>;

    /// Copies the object at `src` to `dst` inside one bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectNotFound`](crate::StoreError::ObjectNotFound)
    /// if `src` is missing, or a backend error.
    async fn copy_object(&self, bucket: &str, src: &str, dst: &str) -> StoreResult<()>;

    /// Removes a single object. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    async fn remove_object(&self, bucket: &str, key: &str) -> StoreResult<()>;

    /// Removes many objects, reporting per-item failures.
    ///
    /// An empty result means every key was removed.
    ///
    /// # Errors
    ///
    /// Returns an error only when the request as a whole fails.
    async fn remove_objects(&self, bucket: &str, keys: &[String])
    -> StoreResult<Vec<DeleteError>>;

    /// Opens the object at `key` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectNotFound`](crate::StoreError::ObjectNotFound)
    /// if no object exists at `key`.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<ByteStream>;
}
