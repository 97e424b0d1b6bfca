//! Reading caller-supplied object bodies.

use cloud_storage_core::{ByteStream, StoreError, StoreResult};
use std::io;
use tokio::io::AsyncReadExt;

/// Reads a whole body into memory, checking it against the declared size.
///
/// Read failures and short or long bodies are reported as
/// [`StoreError::Body`].
pub async fn read_body(key: &str, mut stream: ByteStream, size: u64) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(usize::try_from(size).unwrap_or_default());

    stream
        .read_to_end(&mut buf)
        .await
        .map_err(|source| StoreError::Body {
            key: key.to_string(),
            source,
        })?;

    check_length(key, buf.len() as u64, size)?;
    Ok(buf)
}

/// Fails with [`StoreError::Body`] when `read` differs from `declared`.
pub fn check_length(key: &str, read: u64, declared: u64) -> StoreResult<()> {
    if read == declared {
        return Ok(());
    }

    Err(StoreError::Body {
        key: key.to_string(),
        source: io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {declared} bytes, read {read}"),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_read_body_matching_size() {
        let body = read_body("k", Box::new(Cursor::new(b"hello".to_vec())), 5)
            .await
            .unwrap();
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn test_read_body_size_mismatch() {
        let err = read_body("k", Box::new(Cursor::new(b"hi".to_vec())), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Body { ref key, .. } if key == "k"));
    }
}
