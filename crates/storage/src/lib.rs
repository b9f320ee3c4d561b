//! Object storage for Shelf.
//!
//! This crate provides:
//! - The [`ObjectStore`] abstraction over opaque, key-addressed content
//! - A local filesystem backend with atomic, streamed writes
//! - [`BlobStore`], which keys book content by book identity

pub mod backends;
pub mod blob;
pub mod error;
pub mod traits;

pub use backends::filesystem::FilesystemBackend;
pub use blob::{BlobStore, ContentStream, StoredBlob};
pub use error::{StorageError, StorageResult};
pub use traits::{ByteStream, ObjectMeta, ObjectStore, StreamingUpload};

use shelf_core::config::StorageConfig;
use std::sync::Arc;

/// Create an object store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    config.validate().map_err(StorageError::Config)?;

    match config {
        StorageConfig::Filesystem { path } => {
            let backend = FilesystemBackend::new(path).await?;
            tracing::info!(path = %path.display(), "Filesystem blob storage ready");
            Ok(Arc::new(backend))
        }
    }
}
