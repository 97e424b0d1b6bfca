//! Per-user virtual filesystem over a flat object store.
//!
//! The object store only knows flat keys and prefix listings. This crate
//! layers a folder/file view on top of it:
//!
//! - [`semantics`]: path predicates and move/rename classification
//! - [`codec`]: user paths to object keys and back to descriptors
//! - [`ResourceCatalog`]: listing, stat, existence and search
//! - [`TransferEngine`]: remove, move, upload and directory creation
//! - [`ArchiveBuilder`]: zip assembly for folder downloads
//! - [`ResourceService`]: the per-user facade tying them together
//!
//! # Key layout
//!
//! ```text
//! user-<id>-files/              # user's root
//! user-<id>-files/docs/         # zero-length directory marker (optional)
//! user-<id>-files/docs/a.txt    # file
//! ```
//!
//! A directory exists exactly when at least one key shares its prefix.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_backend::MemoryObjectStore;
//! use cloud_storage_core::{StorageConfig, UserId};
//! use cloud_storage_vfs::ResourceService;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> cloud_storage_core::Result<()> {
//! let service = ResourceService::new(
//!     Arc::new(MemoryObjectStore::new()),
//!     StorageConfig::default(),
//! )?;
//! service.ensure_bucket().await?;
//!
//! let user = UserId::new(7);
//! service.create_directory(user, "docs/").await?;
//! let moved = service.move_resource(user, "docs/", "papers/").await?;
//! assert_eq!(moved.name, "papers");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod codec;
pub mod semantics;

mod archive;
mod catalog;
mod path;
mod service;
mod transfer;

pub use archive::ArchiveBuilder;
pub use catalog::{ResourceCatalog, sort_descriptors};
pub use path::ResourcePath;
pub use service::{Download, ResourceService};
pub use transfer::{TransferEngine, UploadFile};
