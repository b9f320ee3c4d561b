//! Blob store behaviour over the filesystem backend.

mod common;

use bytes::Bytes;
use common::{FailingWriteBackend, chunked, failing_after, seeded_bytes};
use futures::TryStreamExt;
use shelf_core::BookId;
use shelf_storage::{BlobStore, FilesystemBackend, StorageError};
use std::sync::Arc;
use tempfile::TempDir;

async fn blob_store() -> (BlobStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let backend = FilesystemBackend::new(dir.path()).await.unwrap();
    (BlobStore::new(Arc::new(backend)), dir)
}

async fn read_all(blobs: &BlobStore, id: BookId) -> Vec<u8> {
    let chunks: Vec<Bytes> = blobs
        .retrieve(id)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    chunks.concat()
}

#[tokio::test]
async fn test_multi_chunk_roundtrip_is_byte_exact() {
    let (blobs, _dir) = blob_store().await;
    let id = BookId::generate();
    let data = seeded_bytes(7, 300 * 1024 + 3);

    let stored = blobs.store(id, chunked(data.clone(), 10_000)).await.unwrap();

    assert_eq!(stored.size, data.len() as u64);
    assert_eq!(stored.key, BlobStore::key_for(id));
    assert_eq!(blobs.size(id).await.unwrap(), data.len() as u64);
    assert_eq!(read_all(&blobs, id).await, data.to_vec());
}

#[tokio::test]
async fn test_empty_content_is_stored() {
    let (blobs, _dir) = blob_store().await;
    let id = BookId::generate();

    let stored = blobs.store(id, chunked(Bytes::new(), 16)).await.unwrap();

    assert_eq!(stored.size, 0);
    assert!(blobs.exists(id).await.unwrap());
    assert!(read_all(&blobs, id).await.is_empty());
}

#[tokio::test]
async fn test_blobs_are_isolated_per_book() {
    let (blobs, _dir) = blob_store().await;
    let first = BookId::generate();
    let second = BookId::generate();

    blobs
        .store(first, chunked(Bytes::from_static(b"first book"), 4))
        .await
        .unwrap();
    blobs
        .store(second, chunked(Bytes::from_static(b"second book"), 4))
        .await
        .unwrap();

    assert_eq!(read_all(&blobs, first).await, b"first book");
    assert_eq!(read_all(&blobs, second).await, b"second book");
}

#[tokio::test]
async fn test_failing_input_stream_leaves_nothing() {
    let (blobs, dir) = blob_store().await;
    let id = BookId::generate();

    let err = blobs.store(id, failing_after(3)).await.unwrap_err();

    assert!(matches!(err, StorageError::ContentStream(_)), "{err:?}");
    assert!(!blobs.exists(id).await.unwrap());
    let book_dir = dir.path().join("books").join(id.to_string());
    let leftovers: Vec<_> = std::fs::read_dir(book_dir).unwrap().collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[tokio::test]
async fn test_backend_write_failure_aborts_upload() {
    let dir = tempfile::tempdir().unwrap();
    let inner = FilesystemBackend::new(dir.path()).await.unwrap();
    let backend = FailingWriteBackend::new(inner, 1024);
    let blobs = BlobStore::new(backend.clone());
    let id = BookId::generate();

    let err = blobs
        .store(id, chunked(seeded_bytes(1, 4096), 512))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Io(_)), "{err:?}");
    assert_eq!(backend.abort_count(), 1);
    assert!(!blobs.exists(id).await.unwrap());
}

#[tokio::test]
async fn test_missing_blob_is_not_found() {
    let (blobs, _dir) = blob_store().await;
    let id = BookId::generate();

    assert!(!blobs.exists(id).await.unwrap());
    assert!(matches!(
        blobs.retrieve(id).await,
        Err(StorageError::NotFound(_))
    ));
    assert!(matches!(blobs.size(id).await, Err(StorageError::NotFound(_))));
}
