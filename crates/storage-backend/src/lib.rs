//! Object-store backends for per-user cloud file storage.
//!
//! Two implementations of [`ObjectStore`](cloud_storage_core::traits::ObjectStore)
//! are provided:
//!
//! - [`MemoryObjectStore`]: buckets held in memory, for tests and demos
//! - [`FsObjectStore`]: buckets persisted under a local data directory
//!
//! Both share the same delimiter-listing emulation, so a prefix listing
//! behaves identically regardless of where the bytes live.
//!
//! # On-disk layout
//!
//! ```text
//! data_dir/
//! ├── .tmp/                      # in-flight writes, renamed into place
//! └── user-files/                # one directory per bucket
//!     ├── <blake3(key)>.data     # object bytes
//!     └── <blake3(key)>.meta.json
//! ```
//!
//! # Examples
//!
//! ```
//! use cloud_storage_backend::MemoryObjectStore;
//! use cloud_storage_core::traits::ObjectStore;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryObjectStore::new();
//! store.make_bucket("user-files").await?;
//! store.insert("user-files", "user-1-files/docs/a.txt", b"hi".to_vec()).await?;
//!
//! let top = store.list_objects("user-files", "user-1-files/", false).await?;
//! assert_eq!(top[0].key, "user-1-files/docs/");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod body;
mod fs;
mod listing;
mod memory;
mod naming;

pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use naming::validate_bucket_name;
