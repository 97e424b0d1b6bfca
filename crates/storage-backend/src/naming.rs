//! Bucket name validation and on-disk object naming.

use cloud_storage_core::{StoreError, StoreResult};

/// Validates a bucket name.
///
/// Bucket names become directory names for the local-directory backend, so
/// anything that could escape or hide inside the data directory is rejected.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] if the name:
/// - is empty
/// - starts with `.`
/// - contains `/` or `\`
/// - contains control characters
///
/// # Examples
///
/// ```
/// use cloud_storage_backend::validate_bucket_name;
///
/// assert!(validate_bucket_name("user-files").is_ok());
/// assert!(validate_bucket_name("..").is_err());
/// assert!(validate_bucket_name("a/b").is_err());
/// ```
pub fn validate_bucket_name(bucket: &str) -> StoreResult<()> {
    let reason = if bucket.is_empty() {
        "Bucket name cannot be empty"
    } else if bucket.starts_with('.') {
        "Bucket name cannot start with '.'"
    } else if bucket.contains('/') || bucket.contains('\\') {
        "Bucket name cannot contain path separators"
    } else if bucket.chars().any(char::is_control) {
        "Bucket name cannot contain control characters"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidKey {
        key: bucket.to_string(),
        reason: reason.to_string(),
    })
}

/// Returns the file stem under which `key` is stored on disk.
///
/// Hashing keeps `a` and `a/b` from colliding as file and directory.
pub fn object_stem(key: &str) -> String {
    blake3::hash(key.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        for name in ["user-files", "b1", "my_bucket.v2"] {
            assert!(validate_bucket_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_bucket_names() {
        for name in ["", ".", "..", ".tmp", "a/b", "a\\b", "a\nb"] {
            let err = validate_bucket_name(name).unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey { .. }), "{name}");
        }
    }

    #[test]
    fn test_object_stem_is_stable_hex() {
        let stem = object_stem("user-1-files/a.txt");
        assert_eq!(stem.len(), 64);
        assert_eq!(stem, object_stem("user-1-files/a.txt"));
        assert_ne!(stem, object_stem("user-1-files/a.txt/"));
    }
}
