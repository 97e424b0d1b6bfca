//! Strong domain types for cloud file storage.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_core::{ResourceDescriptor, ResourceType, UserId};
//!
//! let user = UserId::new(7);
//! assert_eq!(user.get(), 7);
//!
//! let file = ResourceDescriptor::file("docs/", "notes.txt", 2);
//! assert_eq!(file.resource_type, ResourceType::File);
//! assert_eq!(file.size, Some(2));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::io::AsyncRead;

/// Authenticated user identifier (newtype over `u64`).
///
/// Opaque to the storage layer: it only selects the user's private key
/// prefix.
///
/// # Examples
///
/// ```
/// use cloud_storage_core::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    /// Creates a new user identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Kind of a resource as seen by the user.
///
/// Directories order before files so sorted listings show folders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    /// A folder, emulated by a shared key prefix
    Directory,
    /// A single stored object
    File,
}

impl ResourceType {
    /// Returns the wire name of the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_storage_core::ResourceType;
    ///
    /// assert_eq!(ResourceType::Directory.as_str(), "DIRECTORY");
    /// assert_eq!(ResourceType::File.as_str(), "FILE");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "DIRECTORY",
            Self::File => "FILE",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally visible representation of a file or directory.
///
/// `path` is the parent directory (user-relative, trailing `/`, or `""` for
/// the root) and `name` is the final segment. `size` is absent for
/// directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Parent directory path
    pub path: String,
    /// Final path segment
    pub name: String,
    /// Size in bytes, files only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// File or directory
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

impl ResourceDescriptor {
    /// Creates a file descriptor.
    #[must_use]
    pub fn file(path: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size: Some(size),
            resource_type: ResourceType::File,
        }
    }

    /// Creates a directory descriptor.
    #[must_use]
    pub fn directory(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size: None,
            resource_type: ResourceType::Directory,
        }
    }

    /// The sentinel descriptor for a user's root directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_storage_core::ResourceDescriptor;
    ///
    /// let root = ResourceDescriptor::root();
    /// assert!(root.is_directory());
    /// assert!(root.path.is_empty() && root.name.is_empty());
    /// ```
    #[must_use]
    pub fn root() -> Self {
        Self::directory("", "")
    }

    /// Returns `true` for directory descriptors.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.resource_type == ResourceType::Directory
    }

    /// Returns the full user-relative path this descriptor denotes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_storage_core::ResourceDescriptor;
    ///
    /// assert_eq!(ResourceDescriptor::directory("a/", "b").full_path(), "a/b/");
    /// assert_eq!(ResourceDescriptor::file("a/", "c.txt", 1).full_path(), "a/c.txt");
    /// ```
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.is_directory() && !self.name.is_empty() {
            format!("{}{}/", self.path, self.name)
        } else {
            format!("{}{}", self.path, self.name)
        }
    }
}

/// Raw listing or stat result from the object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Fully qualified key
    pub key: String,
    /// Object size in bytes (0 for common prefixes)
    pub size: u64,
}

impl ObjectRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// Per-item failure reported by a bulk removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteError {
    /// Key that could not be removed
    pub key: String,
    /// Backend message
    pub message: String,
}

/// Readable byte stream used for object bodies.
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;
