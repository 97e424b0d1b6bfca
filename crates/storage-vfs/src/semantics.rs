//! Pure path predicates and move/rename classification.
//!
//! Paths are user-relative strings. A trailing `/` marks a directory and the
//! empty string is the user's root. Nothing here touches the object store.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_vfs::semantics::{classify, Operation};
//!
//! assert_eq!(classify("a/b.txt", "c/b.txt"), Operation::Move);
//! assert_eq!(classify("a/b.txt", "a/c.txt"), Operation::Rename);
//! assert_eq!(classify("a/b.txt", "x/y.txt"), Operation::Invalid);
//! assert_eq!(classify("a/b.txt", ""), Operation::MoveToRoot);
//! ```

/// How a `(from, to)` pair should be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Same parent, different final segment
    Rename,
    /// Different parent, same final segment
    Move,
    /// Empty destination: move into (or describe at) the user's root
    MoveToRoot,
    /// The paths differ in an unsupported way
    Invalid,
}

/// Returns `true` if `path` names a directory.
#[must_use]
pub fn is_directory(path: &str) -> bool {
    path.ends_with('/')
}

/// Returns `true` if `path` is free of `..`, `//` and a leading `/`.
///
/// The empty root path is valid; callers that need a concrete resource must
/// reject it themselves.
///
/// # Examples
///
/// ```
/// use cloud_storage_vfs::semantics::is_valid;
///
/// assert!(is_valid("docs/notes.txt"));
/// assert!(is_valid(""));
/// assert!(!is_valid("/docs/"));
/// assert!(!is_valid("docs//notes.txt"));
/// assert!(!is_valid("docs/../etc"));
/// ```
#[must_use]
pub fn is_valid(path: &str) -> bool {
    !path.contains("..") && !path.contains("//") && !path.starts_with('/')
}

fn trim_directory(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Returns the parent directory of `path`, with its trailing `/`.
///
/// Single-segment paths live in the root, so their parent is `""`.
///
/// # Examples
///
/// ```
/// use cloud_storage_vfs::semantics::dir_of;
///
/// assert_eq!(dir_of("a/b/c.txt"), "a/b/");
/// assert_eq!(dir_of("a/b/"), "a/");
/// assert_eq!(dir_of("a/"), "");
/// assert_eq!(dir_of("c.txt"), "");
/// ```
#[must_use]
pub fn dir_of(path: &str) -> &str {
    let trimmed = trim_directory(path);
    trimmed.rfind('/').map_or("", |slash| &trimmed[..=slash])
}

/// Returns the final segment of `path`, without any trailing `/`.
///
/// # Examples
///
/// ```
/// use cloud_storage_vfs::semantics::name_of;
///
/// assert_eq!(name_of("a/b/c.txt"), "c.txt");
/// assert_eq!(name_of("a/b/"), "b");
/// assert_eq!(name_of(""), "");
/// ```
#[must_use]
pub fn name_of(path: &str) -> &str {
    let trimmed = trim_directory(path);
    trimmed
        .rfind('/')
        .map_or(trimmed, |slash| &trimmed[slash + 1..])
}

/// Classifies a move request.
///
/// A rename keeps the parent and changes the name; a move keeps the name
/// and changes the parent. Both endpoints must agree on being a file or a
/// directory. An empty `to` always means the root.
#[must_use]
pub fn classify(from: &str, to: &str) -> Operation {
    if to.is_empty() {
        return Operation::MoveToRoot;
    }

    if is_directory(from) != is_directory(to) {
        return Operation::Invalid;
    }

    let same_dir = dir_of(from) == dir_of(to);
    let same_name = name_of(from) == name_of(to);

    match (same_dir, same_name) {
        (true, false) => Operation::Rename,
        (false, true) => Operation::Move,
        _ => Operation::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directory_matches_trailing_slash() {
        for path in ["", "a", "a/", "a/b", "a/b/", "a.txt"] {
            assert_eq!(is_directory(path), path.ends_with('/'), "{path}");
        }
    }

    #[test]
    fn test_dir_of_nested_directory() {
        assert_eq!(dir_of("x/y/z/"), "x/y/");
        assert_eq!(dir_of(""), "");
    }

    #[test]
    fn test_classify_file_pairs() {
        assert_eq!(classify("a/b.txt", "c/b.txt"), Operation::Move);
        assert_eq!(classify("a/b.txt", "a/c.txt"), Operation::Rename);
        assert_eq!(classify("a/b.txt", "x/y.txt"), Operation::Invalid);
        assert_eq!(classify("a/b.txt", "a/b.txt"), Operation::Invalid);
    }

    #[test]
    fn test_classify_single_segment_directories() {
        assert_eq!(classify("a/", "b/"), Operation::Rename);
        assert_eq!(classify("a/", "b/a/"), Operation::Move);
        assert_eq!(classify("b/a/", "a/"), Operation::Move);
    }

    #[test]
    fn test_classify_root_level_files() {
        assert_eq!(classify("notes.txt", "docs/notes.txt"), Operation::Move);
        assert_eq!(classify("notes.txt", "todo.txt"), Operation::Rename);
    }

    #[test]
    fn test_classify_kind_mismatch_is_invalid() {
        assert_eq!(classify("a/b", "a/c/"), Operation::Invalid);
        assert_eq!(classify("a/", "b"), Operation::Invalid);
    }

    #[test]
    fn test_classify_empty_destination_is_root() {
        assert_eq!(classify("a/", ""), Operation::MoveToRoot);
        assert_eq!(classify("a/b.txt", ""), Operation::MoveToRoot);
    }
}
