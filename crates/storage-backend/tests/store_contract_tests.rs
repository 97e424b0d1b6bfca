//! Behaviour shared by every object-store backend.

use cloud_storage_backend::{FsObjectStore, MemoryObjectStore};
use cloud_storage_core::traits::ObjectStore;
use cloud_storage_core::{ByteStream, ObjectRecord, StoreError};
use std::io::Cursor;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

const BUCKET: &str = "user-files";

fn body(bytes: &[u8]) -> ByteStream {
    Box::new(Cursor::new(bytes.to_vec()))
}

async fn seed(store: &dyn ObjectStore) {
    store.make_bucket(BUCKET).await.unwrap();
    let objects: [(&str, &[u8]); 6] = [
        ("user-1-files/", b""),
        ("user-1-files/notes.txt", b"hi"),
        ("user-1-files/docs/", b""),
        ("user-1-files/docs/a.txt", b"abc"),
        ("user-1-files/docs/deep/b.txt", b"bbbb"),
        ("user-2-files/secret.txt", b"no"),
    ];

    for (key, bytes) in objects {
        store
            .put_object(BUCKET, key, body(bytes), bytes.len() as u64)
            .await
            .unwrap();
    }
}

async fn check_listing(store: &dyn ObjectStore) {
    seed(store).await;

    let top = store
        .list_objects(BUCKET, "user-1-files/", false)
        .await
        .unwrap();
    assert_eq!(
        top,
        vec![
            ObjectRecord::new("user-1-files/", 0),
            ObjectRecord::new("user-1-files/docs/", 0),
            ObjectRecord::new("user-1-files/notes.txt", 2),
        ]
    );

    let all = store
        .list_objects(BUCKET, "user-1-files/docs/", true)
        .await
        .unwrap();
    let keys: Vec<_> = all.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "user-1-files/docs/",
            "user-1-files/docs/a.txt",
            "user-1-files/docs/deep/b.txt"
        ]
    );

    assert!(
        store
            .list_objects(BUCKET, "user-3-files/", true)
            .await
            .unwrap()
            .is_empty()
    );
}

async fn check_copy_remove_get(store: &dyn ObjectStore) {
    seed(store).await;

    store
        .copy_object(BUCKET, "user-1-files/notes.txt", "user-1-files/docs/notes.txt")
        .await
        .unwrap();
    store
        .remove_object(BUCKET, "user-1-files/notes.txt")
        .await
        .unwrap();

    let err = store
        .stat_object(BUCKET, "user-1-files/notes.txt")
        .await
        .unwrap_err();
    assert!(err.is_object_not_found());

    let mut stream = store
        .get_object(BUCKET, "user-1-files/docs/notes.txt")
        .await
        .unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    assert_eq!(out, "hi");

    let keys = vec![
        "user-1-files/docs/a.txt".to_string(),
        "user-1-files/docs/deep/b.txt".to_string(),
    ];
    let errors = store.remove_objects(BUCKET, &keys).await.unwrap();
    assert!(errors.is_empty());

    let left = store
        .list_objects(BUCKET, "user-1-files/docs/", true)
        .await
        .unwrap();
    assert_eq!(left.len(), 2);
}

async fn check_missing_bucket(store: &dyn ObjectStore) {
    assert!(!store.bucket_exists("absent").await.unwrap());
    let err = store.list_objects("absent", "", true).await.unwrap_err();
    assert!(matches!(err, StoreError::BucketNotFound { .. }));
}

#[tokio::test]
async fn test_memory_listing_contract() {
    check_listing(&MemoryObjectStore::new()).await;
}

#[tokio::test]
async fn test_fs_listing_contract() {
    let temp = TempDir::new().unwrap();
    check_listing(&FsObjectStore::new(temp.path()).unwrap()).await;
}

#[tokio::test]
async fn test_memory_copy_remove_get() {
    check_copy_remove_get(&MemoryObjectStore::new()).await;
}

#[tokio::test]
async fn test_fs_copy_remove_get() {
    let temp = TempDir::new().unwrap();
    check_copy_remove_get(&FsObjectStore::new(temp.path()).unwrap()).await;
}

#[tokio::test]
async fn test_memory_missing_bucket() {
    check_missing_bucket(&MemoryObjectStore::new()).await;
}

#[tokio::test]
async fn test_fs_missing_bucket() {
    let temp = TempDir::new().unwrap();
    check_missing_bucket(&FsObjectStore::new(temp.path()).unwrap()).await;
}

#[tokio::test]
async fn test_fs_objects_survive_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let store = FsObjectStore::new(temp.path()).unwrap();
        seed(&store).await;
    }

    let reopened = FsObjectStore::new(temp.path()).unwrap();
    let record = reopened
        .stat_object(BUCKET, "user-1-files/docs/deep/b.txt")
        .await
        .unwrap();
    assert_eq!(record.size, 4);
}
