//! Opening the storage service for one CLI invocation.

use crate::cli::StorageArgs;
use crate::commands::config::Config;
use anyhow::{Context, Result};
use cloud_storage_backend::FsObjectStore;
use cloud_storage_core::UserId;
use cloud_storage_vfs::ResourceService;
use std::path::PathBuf;
use std::sync::Arc;

/// A resource service over the local object store, bound to one user.
#[derive(Debug, Clone)]
pub struct Session {
    /// Service over the configured bucket
    pub service: ResourceService,
    /// User every command acts as
    pub user: UserId,
}

impl Session {
    /// Opens the store described by `config`, with `args` taking precedence.
    ///
    /// Creates the data directory and bucket on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if no user is configured, or the store cannot be
    /// opened.
    pub async fn open(config: &Config, args: &StorageArgs) -> Result<Self> {
        let user = args
            .user
            .or(config.general.user_id)
            .map(UserId::new)
            .context("no user selected: pass --user or set general.user_id")?;

        let data_dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.storage.data_dir));
        let store = FsObjectStore::new(&data_dir)
            .with_context(|| format!("failed to open object store at {}", data_dir.display()))?;

        let service = ResourceService::new(
            Arc::new(store),
            config.storage_config(args.bucket.as_deref()),
        )?;
        service.ensure_bucket().await?;

        tracing::debug!(%user, data_dir = %data_dir.display(), "Opened storage session");
        Ok(Self { service, user })
    }
}
