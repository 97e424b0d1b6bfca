//! Conversion between user-relative paths and object keys.
//!
//! Every key has the shape `user-<id>-files/<path>`. Directories have no
//! object of their own beyond an optional zero-length marker at the
//! directory key.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_core::UserId;
//! use cloud_storage_vfs::codec;
//!
//! let key = codec::encode(UserId::new(1), "docs/notes.txt");
//! assert_eq!(key, "user-1-files/docs/notes.txt");
//! assert_eq!(codec::parent_and_name_for_file(&key), ("docs/", "notes.txt"));
//! ```

use cloud_storage_core::{ObjectRecord, ResourceDescriptor, UserId};

/// Returns the key prefix of the user's root directory.
#[must_use]
pub fn user_root(user: UserId) -> String {
    format!("user-{user}-files/")
}

/// Derives the object key for a user-relative path.
///
/// No escaping is applied; `path` must already be validated.
#[must_use]
pub fn encode(user: UserId, path: &str) -> String {
    let mut key = user_root(user);
    key.push_str(path);
    key
}

/// Strips the user prefix from a key, yielding the user-relative path.
///
/// # Examples
///
/// ```
/// use cloud_storage_vfs::codec::relative;
///
/// assert_eq!(relative("user-3-files/a/b.txt"), "a/b.txt");
/// assert_eq!(relative("user-3-files/"), "");
/// ```
#[must_use]
pub fn relative(key: &str) -> &str {
    key.find('/').map_or(key, |slash| &key[slash + 1..])
}

/// Splits a file key into its parent path and file name.
///
/// The parent keeps its trailing `/` and is `""` for root-level files.
#[must_use]
pub fn parent_and_name_for_file(key: &str) -> (&str, &str) {
    let Some(first) = key.find('/') else {
        return ("", key);
    };
    let last = key.rfind('/').unwrap_or(first);

    (&key[first + 1..=last], &key[last + 1..])
}

/// Splits a directory key into the directory's parent path and its name.
///
/// The user's root key yields `("", "")`.
///
/// # Examples
///
/// ```
/// use cloud_storage_vfs::codec::parent_and_name_for_directory;
///
/// assert_eq!(parent_and_name_for_directory("user-1-files/a/b/"), ("a/", "b"));
/// assert_eq!(parent_and_name_for_directory("user-1-files/a/"), ("", "a"));
/// assert_eq!(parent_and_name_for_directory("user-1-files/"), ("", ""));
/// ```
#[must_use]
pub fn parent_and_name_for_directory(key: &str) -> (&str, &str) {
    let Some(first) = key.find('/') else {
        return ("", "");
    };
    let trimmed = key.strip_suffix('/').unwrap_or(key);
    if trimmed.len() <= first {
        return ("", "");
    }

    let folder = &trimmed[first + 1..];
    folder
        .rfind('/')
        .map_or(("", folder), |slash| (&folder[..=slash], &folder[slash + 1..]))
}

/// Builds a file descriptor from a file key and its size.
#[must_use]
pub fn file_descriptor(key: &str, size: u64) -> ResourceDescriptor {
    let (path, name) = parent_and_name_for_file(key);
    ResourceDescriptor::file(path, name, size)
}

/// Builds a directory descriptor from a directory key.
#[must_use]
pub fn directory_descriptor(key: &str) -> ResourceDescriptor {
    let (path, name) = parent_and_name_for_directory(key);
    ResourceDescriptor::directory(path, name)
}

/// Builds the descriptor for a listed record, by the shape of its key.
#[must_use]
pub fn descriptor_for(record: &ObjectRecord) -> ResourceDescriptor {
    if record.key.ends_with('/') {
        directory_descriptor(&record.key)
    } else {
        file_descriptor(&record.key, record.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_storage_core::ResourceType;

    #[test]
    fn test_user_root() {
        assert_eq!(user_root(UserId::new(42)), "user-42-files/");
    }

    #[test]
    fn test_encode_root_is_user_prefix() {
        assert_eq!(encode(UserId::new(1), ""), "user-1-files/");
        assert_eq!(encode(UserId::new(1), "a/"), "user-1-files/a/");
    }

    #[test]
    fn test_parent_and_name_for_root_level_file() {
        assert_eq!(
            parent_and_name_for_file("user-1-files/notes.txt"),
            ("", "notes.txt")
        );
    }

    #[test]
    fn test_parent_and_name_for_nested_file() {
        assert_eq!(
            parent_and_name_for_file("user-1-files/a/b/c.txt"),
            ("a/b/", "c.txt")
        );
    }

    #[test]
    fn test_parent_and_name_for_deep_directory() {
        assert_eq!(
            parent_and_name_for_directory("user-1-files/a/b/c/"),
            ("a/b/", "c")
        );
    }

    #[test]
    fn test_parent_and_name_for_top_level_directory_and_root() {
        assert_eq!(parent_and_name_for_directory("user-1-files/docs/"), ("", "docs"));
        assert_eq!(parent_and_name_for_directory("user-1-files/"), ("", ""));
        assert_eq!(parent_and_name_for_directory("no-slash"), ("", ""));
    }

    #[test]
    fn test_descriptor_for_records() {
        let dir = descriptor_for(&ObjectRecord::new("user-1-files/docs/", 0));
        assert_eq!(dir, ResourceDescriptor::directory("", "docs"));

        let file = descriptor_for(&ObjectRecord::new("user-1-files/docs/a.txt", 3));
        assert_eq!(file.resource_type, ResourceType::File);
        assert_eq!(file.path, "docs/");
        assert_eq!(file.size, Some(3));
    }
}
