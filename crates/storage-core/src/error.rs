//! Error types for cloud file storage.
//!
//! Two layers are kept apart:
//! - [`StoreError`] is what an object-store collaborator reports.
//! - [`Error`] is what the storage core reports to its caller. It has one
//!   variant per request-level failure and wraps any collaborator fault that
//!   the core does not translate.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_core::{Error, Result};
//!
//! fn require_directory(path: &str) -> Result<()> {
//!     if !path.ends_with('/') {
//!         return Err(Error::InvalidPath {
//!             path: path.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_directory("notes.txt").unwrap_err();
//! assert!(err.is_invalid_input());
//! ```

use thiserror::Error;

/// Main error type for storage operations.
///
/// Every variant is request-scoped: it carries no partial-success
/// information beyond what has already been committed to the store.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed path (leading `/`, `..`, `//`, or blank where required).
    #[error("Invalid or missing path: '{path}'")]
    InvalidPath {
        /// The rejected path
        path: String,
    },

    /// The `from`/`to` pair fits neither the rename nor the move pattern.
    #[error("The paths differ in an unsupported way: '{from}' -> '{to}'")]
    InvalidOperation {
        /// Source path
        from: String,
        /// Destination path
        to: String,
    },

    /// The target key or prefix has no matching objects.
    #[error("The resource was not found: {resource}")]
    ResourceNotFound {
        /// Path or key that was looked up
        resource: String,
    },

    /// The destination key collides with an existing object.
    #[error("The resource on the way to already exists: {resource}")]
    ResourceAlreadyExists {
        /// Colliding path or key
        resource: String,
    },

    /// The directory-creation target already has content.
    #[error("The directory already exists: {path}")]
    DirectoryAlreadyExists {
        /// Directory path
        path: String,
    },

    /// The directory-creation target's parent is absent.
    #[error("The parent directory does not exist: {path}")]
    ParentDirectoryNotFound {
        /// Directory path whose parent is missing
        path: String,
    },

    /// Malformed upload input (empty file list, zero-byte file, unreadable stream).
    #[error("Invalid request body: {reason}")]
    InvalidRequestBody {
        /// What was wrong with the body
        reason: String,
    },

    /// Blank search query.
    #[error("Invalid or missing query: '{query}'")]
    InvalidQuery {
        /// The rejected query
        query: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid or missing required fields.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A folder archive could not be assembled.
    #[error("Failed to build archive: {message}")]
    Archive {
        /// Description of the failure
        message: String,
    },

    /// Unrecoverable fault reported by the object-store collaborator.
    #[error("Object store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns `true` if this is a resource not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_storage_core::Error;
    ///
    /// let err = Error::ResourceNotFound {
    ///     resource: "docs/".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. } | Self::ParentDirectoryNotFound { .. }
        )
    }

    /// Returns `true` if the request collided with existing content.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_storage_core::Error;
    ///
    /// let err = Error::DirectoryAlreadyExists {
    ///     path: "docs/".to_string(),
    /// };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ResourceAlreadyExists { .. } | Self::DirectoryAlreadyExists { .. }
        )
    }

    /// Returns `true` if the caller supplied malformed input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. }
                | Self::InvalidOperation { .. }
                | Self::InvalidRequestBody { .. }
                | Self::InvalidQuery { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this error came from the object store untranslated
    /// or from archive assembly.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Archive { .. })
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by an object-store collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The bucket does not exist.
    #[error("Bucket not found: {bucket}")]
    BucketNotFound {
        /// Bucket name
        bucket: String,
    },

    /// No object exists at the key.
    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// The key or bucket name cannot be stored by this backend.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey {
        /// Offending key or bucket name
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// The caller-supplied body stream could not be read.
    #[error("Failed to read body for {key}: {source}")]
    Body {
        /// Key being written
        key: String,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error inside the backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend metadata could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backend failure.
    #[error("Backend error: {message}")]
    Backend {
        /// Description of the failure
        message: String,
    },
}

impl StoreError {
    /// Returns `true` if the object (not the bucket) is missing.
    #[must_use]
    pub const fn is_object_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound { .. })
    }
}

/// Result type alias for object-store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_error_detection() {
        let err = Error::ResourceNotFound {
            resource: "docs/".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_conflict());

        let err = Error::ParentDirectoryNotFound {
            path: "a/b/".to_string(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_error_detection() {
        let err = Error::ResourceAlreadyExists {
            resource: "notes.txt".to_string(),
        };
        assert!(err.is_conflict());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_invalid_input_detection() {
        let errors = [
            Error::InvalidPath {
                path: "/abs".to_string(),
            },
            Error::InvalidOperation {
                from: "a/b.txt".to_string(),
                to: "x/y.txt".to_string(),
            },
            Error::InvalidRequestBody {
                reason: "empty file list".to_string(),
            },
            Error::InvalidQuery {
                query: " ".to_string(),
            },
        ];

        for err in &errors {
            assert!(err.is_invalid_input(), "{err:?}");
            assert!(!err.is_infrastructure());
        }
    }

    #[test]
    fn test_store_error_passes_through() {
        let store_err = StoreError::Backend {
            message: "connection reset".to_string(),
        };
        let err: Error = store_err.into();

        assert!(err.is_infrastructure());
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidOperation {
            from: "a/b.txt".to_string(),
            to: "x/y.txt".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("a/b.txt"));
        assert!(display.contains("x/y.txt"));

        let err = Error::DirectoryAlreadyExists {
            path: "docs/".to_string(),
        };
        assert_eq!(err.to_string(), "The directory already exists: docs/");
    }

    #[test]
    fn test_store_io_error_source_chain() {
        use std::error::Error as _;

        let err = StoreError::Body {
            key: "user-1-files/a.txt".to_string(),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"),
        };
        assert!(err.source().is_some());
        assert!(!err.is_object_not_found());
    }

    #[test]
    fn test_object_not_found_detection() {
        let err = StoreError::ObjectNotFound {
            bucket: "user-files".to_string(),
            key: "user-1-files/a.txt".to_string(),
        };
        assert!(err.is_object_not_found());
        assert!(err.to_string().contains("user-files/user-1-files/a.txt"));
    }
}
