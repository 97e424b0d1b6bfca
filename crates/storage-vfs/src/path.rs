//! Validated user-relative resource paths.

use crate::semantics;
use cloud_storage_core::{Error, Result};
use std::fmt;

/// A validated path relative to a user's private root.
///
/// `ResourcePath` uses forward slashes only:
/// - A trailing `/` marks a directory
/// - No leading `/`, no `..`, no `//`
/// - The empty string is the user's root directory
///
/// # Examples
///
/// ```
/// use cloud_storage_vfs::ResourcePath;
///
/// let path = ResourcePath::new("docs/notes.txt").unwrap();
/// assert_eq!(path.name(), "notes.txt");
/// assert_eq!(path.parent(), "docs/");
/// assert!(!path.is_directory());
///
/// assert!(ResourcePath::new("/etc/passwd").is_err());
/// assert!(ResourcePath::new("").unwrap().is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path starts with `/`, contains
    /// `..` or `//`, or is made of whitespace only.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();

        if !semantics::is_valid(&path) || (!path.is_empty() && path.trim().is_empty()) {
            return Err(Error::InvalidPath { path });
        }

        Ok(Self(path))
    }

    /// The user's root directory.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the user's root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` for directory paths (including the root).
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.is_root() || semantics::is_directory(&self.0)
    }

    /// Returns the parent directory path (`""` for top-level entries).
    #[must_use]
    pub fn parent(&self) -> &str {
        semantics::dir_of(&self.0)
    }

    /// Returns the final path segment.
    #[must_use]
    pub fn name(&self) -> &str {
        semantics::name_of(&self.0)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        for path in ["", "a", "a/", "a/b.txt", "a b/c d/", "dots.in.name/x"] {
            assert!(ResourcePath::new(path).is_ok(), "{path}");
        }
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["/a", "a//b", "../a", "a/../b", "a/..", "   "] {
            let err = ResourcePath::new(path).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPath { path: ref p } if p == path),
                "{path}"
            );
        }
    }

    #[test]
    fn test_root_is_directory() {
        let root = ResourcePath::root();
        assert!(root.is_root());
        assert!(root.is_directory());
        assert_eq!(root.name(), "");
        assert_eq!(root.parent(), "");
    }

    #[test]
    fn test_directory_accessors() {
        let dir = ResourcePath::new("docs/reports/").unwrap();
        assert!(dir.is_directory());
        assert_eq!(dir.name(), "reports");
        assert_eq!(dir.parent(), "docs/");
        assert_eq!(dir.to_string(), "docs/reports/");
    }
}
