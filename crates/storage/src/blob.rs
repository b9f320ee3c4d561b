//! Book content blobs addressed by book identity.

use crate::error::{StorageError, StorageResult};
use crate::traits::{ByteStream, ObjectStore};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use shelf_core::BookId;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Incoming content for a blob write. Borrowing lets callers feed a request
/// body or multipart field straight through without buffering.
pub type ContentStream<'a> = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'a>>;

/// Where a stored blob landed and how large it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
    pub size: u64,
}

/// Blob store over an [`ObjectStore`] backend.
///
/// Every book has at most one blob, kept under `books/<book-id>/content`.
/// Bytes are stored verbatim.
#[derive(Clone)]
pub struct BlobStore {
    objects: Arc<dyn ObjectStore>,
}

impl BlobStore {
    pub fn new(objects: Arc<dyn ObjectStore>) -> Self {
        Self { objects }
    }

    /// Object key for a book's content.
    pub fn key_for(id: BookId) -> String {
        format!("books/{id}/content")
    }

    pub fn backend_name(&self) -> &'static str {
        self.objects.backend_name()
    }

    /// Stream `content` into the blob for `id`.
    ///
    /// The blob becomes visible only once the stream is fully consumed. If
    /// the input stream or a backend write fails, the partial upload is
    /// discarded.
    #[instrument(skip(self, content), fields(book_id = %id, backend = self.backend_name()))]
    pub async fn store(&self, id: BookId, mut content: ContentStream<'_>) -> StorageResult<StoredBlob> {
        let key = Self::key_for(id);
        let mut upload = self.objects.put_stream(&key).await?;

        while let Some(chunk) = content.next().await {
            let result = match chunk {
                Ok(data) if data.is_empty() => continue,
                Ok(data) => upload.write(data).await,
                Err(err) => Err(StorageError::ContentStream(err)),
            };
            if let Err(err) = result {
                warn!(error = %err, "aborting blob upload");
                if let Err(abort_err) = upload.abort().await {
                    warn!(error = %abort_err, "failed to discard partial blob");
                }
                return Err(err);
            }
        }

        let size = upload.finish().await?;
        debug!(size, "blob stored");
        Ok(StoredBlob { key, size })
    }

    /// Stream the blob for `id` back in backend-sized chunks.
    #[instrument(skip(self), fields(book_id = %id))]
    pub async fn retrieve(&self, id: BookId) -> StorageResult<ByteStream> {
        self.objects.get_stream(&Self::key_for(id)).await
    }

    pub async fn exists(&self, id: BookId) -> StorageResult<bool> {
        self.objects.exists(&Self::key_for(id)).await
    }

    /// Size of the stored blob in bytes.
    pub async fn size(&self, id: BookId) -> StorageResult<u64> {
        Ok(self.objects.head(&Self::key_for(id)).await?.size)
    }

    pub async fn health_check(&self) -> StorageResult<()> {
        self.objects.health_check().await
    }
}
