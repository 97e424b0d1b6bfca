//! Core types, traits, and errors for per-user cloud file storage.
//!
//! This crate provides the foundational types and abstractions used across
//! all other crates in the cloud storage workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`UserId`, `ResourceDescriptor`, `ObjectRecord`)
//! - Error hierarchy with one variant per failure the storage layer reports
//! - The [`traits::ObjectStore`] collaborator trait for flat key-value backends
//! - Configuration types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;
pub mod traits;

pub use config::{StorageConfig, StorageConfigBuilder};
pub use error::{Error, Result, StoreError, StoreResult};
pub use types::{ByteStream, DeleteError, ObjectRecord, ResourceDescriptor, ResourceType, UserId};
