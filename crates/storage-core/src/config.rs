//! Configuration types for cloud file storage.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_core::StorageConfig;
//!
//! let config = StorageConfig::default();
//! assert_eq!(config.bucket, "user-files");
//! assert!(config.validate().is_ok());
//!
//! let custom = StorageConfig::builder()
//!     .bucket("team-files")
//!     .root_archive_name("home")
//!     .build();
//! assert_eq!(custom.root_archive_name, "home");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default bucket holding every user's objects.
pub const DEFAULT_BUCKET: &str = "user-files";

/// Default archive base name used when a user's root is downloaded.
pub const DEFAULT_ROOT_ARCHIVE_NAME: &str = "root";

/// Storage service configuration.
///
/// All users share one bucket; each user's objects live under a private
/// key prefix inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bucket holding all user objects.
    ///
    /// Default: `"user-files"`
    pub bucket: String,

    /// Zip base name used when the user's root directory is downloaded.
    ///
    /// Default: `"root"` (yields `root.zip`)
    pub root_archive_name: String,

    /// Create the bucket on startup when it does not exist.
    ///
    /// Default: true
    pub create_bucket: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            root_archive_name: DEFAULT_ROOT_ARCHIVE_NAME.to_string(),
            create_bucket: true,
        }
    }
}

impl StorageConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - The bucket name is blank or contains `/` or `..`
    /// - The root archive name is blank or contains `/`
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_storage_core::StorageConfig;
    ///
    /// let mut config = StorageConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.bucket = "a/b".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "Bucket name cannot be empty".to_string(),
            });
        }

        if self.bucket.contains('/') || self.bucket.contains("..") {
            return Err(Error::ConfigError {
                message: format!("Bucket name '{}' cannot contain '/' or '..'", self.bucket),
            });
        }

        if self.root_archive_name.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "Root archive name cannot be empty".to_string(),
            });
        }

        if self.root_archive_name.contains('/') {
            return Err(Error::ConfigError {
                message: format!(
                    "Root archive name '{}' cannot contain '/'",
                    self.root_archive_name
                ),
            });
        }

        Ok(())
    }
}

/// Builder for [`StorageConfig`].
///
/// # Examples
///
/// ```
/// use cloud_storage_core::StorageConfig;
///
/// let config = StorageConfig::builder()
///     .bucket("archive")
///     .create_bucket(false)
///     .build();
///
/// assert_eq!(config.bucket, "archive");
/// assert!(!config.create_bucket);
/// ```
#[derive(Debug, Default)]
pub struct StorageConfigBuilder {
    config: StorageConfig,
}

impl StorageConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bucket name.
    #[must_use]
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.bucket = bucket.into();
        self
    }

    /// Sets the root archive name.
    #[must_use]
    pub fn root_archive_name(mut self, name: impl Into<String>) -> Self {
        self.config.root_archive_name = name.into();
        self
    }

    /// Enables or disables bucket creation on startup.
    #[must_use]
    pub const fn create_bucket(mut self, create: bool) -> Self {
        self.config.create_bucket = create;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> StorageConfig {
        self.config
    }
}
