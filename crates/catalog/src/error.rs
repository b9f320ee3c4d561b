//! Catalog error types.

use shelf_core::BookId;
use shelf_metadata::MetadataError;
use shelf_storage::StorageError;
use thiserror::Error;

/// Coarse classification of a [`CatalogError`], used by callers to pick a
/// response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] shelf_core::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("metadata error: {0}")]
    Metadata(#[source] MetadataError),

    #[error("storage error: {0}")]
    Storage(#[source] StorageError),

    /// The book record was persisted but its content was not, or was
    /// stored but could not be attached to the record.
    #[error("book {book_id} was saved but its content could not be stored: {source}")]
    PartialWrite {
        book_id: BookId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Metadata(_) | Self::Storage(_) | Self::PartialWrite { .. } => ErrorKind::Storage,
        }
    }

    /// The id of a book that exists despite this error, if any.
    pub fn saved_book(&self) -> Option<BookId> {
        match self {
            Self::PartialWrite { book_id, .. } => Some(*book_id),
            _ => None,
        }
    }
}

impl From<MetadataError> for CatalogError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Validation(e) => Self::Validation(e),
            MetadataError::NotFound(what) => Self::NotFound(what),
            other => Self::Metadata(other),
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => Self::NotFound(key),
            other => Self::Storage(other),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
