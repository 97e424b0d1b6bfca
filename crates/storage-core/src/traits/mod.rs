//! Collaborator traits for cloud file storage.
//!
//! # Module Structure
//!
//! - `object_store` - Flat key-value object store with prefix listing

mod object_store;

pub use object_store::ObjectStore;
