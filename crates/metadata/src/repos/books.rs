//! Book repository trait.

use crate::error::MetadataResult;
use crate::models::BookRow;
use crate::predicate::{BookField, FieldValue, Predicate};
use async_trait::async_trait;
use shelf_core::{BookFields, BookId};

/// Repository for book records.
#[async_trait]
pub trait BookRepo: Send + Sync {
    /// Persist a book, generating an id when none is given. Returns the id.
    ///
    /// Fails with `Validation` when the numeric fields are out of range and
    /// with `AlreadyExists` when the given id is taken.
    async fn put_book(&self, id: Option<BookId>, book: &BookFields) -> MetadataResult<BookId>;

    /// Get a book by id.
    async fn get_book(&self, id: BookId) -> MetadataResult<Option<BookRow>>;

    /// All books matching the predicate, in insertion order.
    async fn scan_books(&self, predicate: &Predicate<BookField>) -> MetadataResult<Vec<BookRow>>;

    /// First book, in insertion order, whose field equals `value`.
    async fn find_book_by_field(
        &self,
        field: BookField,
        value: FieldValue,
    ) -> MetadataResult<Option<BookRow>>;

    /// Record the attached document for a book that has none yet.
    ///
    /// Fails with `NotFound` for an unknown book and `AlreadyExists` when a
    /// document is already attached.
    async fn attach_content(&self, id: BookId, key: &str, size: u64) -> MetadataResult<()>;
}
