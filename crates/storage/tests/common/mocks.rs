use async_trait::async_trait;
use bytes::Bytes;
use shelf_storage::{
    ByteStream, FilesystemBackend, ObjectMeta, ObjectStore, StorageError, StorageResult,
    StreamingUpload,
};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps a filesystem backend, failing every upload once it has accepted
/// `budget` bytes. Counts aborted uploads so tests can check cleanup.
#[allow(dead_code)]
pub struct FailingWriteBackend {
    inner: FilesystemBackend,
    budget: usize,
    pub aborts: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingWriteBackend {
    pub fn new(inner: FilesystemBackend, budget: usize) -> Arc<Self> {
        Arc::new(Self {
            inner,
            budget,
            aborts: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for FailingWriteBackend {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    async fn head(&self, key: &str) -> StorageResult<ObjectMeta> {
        self.inner.head(key).await
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.inner.get(key).await
    }

    async fn get_stream(&self, key: &str) -> StorageResult<ByteStream> {
        self.inner.get_stream(key).await
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        self.inner.put(key, data).await
    }

    async fn put_stream(&self, key: &str) -> StorageResult<Box<dyn StreamingUpload>> {
        Ok(Box::new(FailingUpload {
            inner: self.inner.put_stream(key).await?,
            remaining: self.budget,
            aborts: self.aborts.clone(),
        }))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

struct FailingUpload {
    inner: Box<dyn StreamingUpload>,
    remaining: usize,
    aborts: Arc<AtomicUsize>,
}

#[async_trait]
impl StreamingUpload for FailingUpload {
    async fn write(&mut self, data: Bytes) -> StorageResult<()> {
        if data.len() > self.remaining {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::StorageFull,
                "disk full",
            )));
        }
        self.remaining -= data.len();
        self.inner.write(data).await
    }

    async fn finish(self: Box<Self>) -> StorageResult<u64> {
        self.inner.finish().await
    }

    async fn abort(self: Box<Self>) -> StorageResult<()> {
        self.aborts.fetch_add(1, Ordering::SeqCst);
        self.inner.abort().await
    }
}
