//! Author repository trait.

use crate::error::MetadataResult;
use crate::models::AuthorRow;
use crate::predicate::{AuthorField, FieldValue, Predicate};
use async_trait::async_trait;
use shelf_core::{AuthorFields, AuthorId};

/// Repository for author records.
#[async_trait]
pub trait AuthorRepo: Send + Sync {
    /// Persist an author, generating an id when none is given. Returns the id.
    async fn put_author(
        &self,
        id: Option<AuthorId>,
        author: &AuthorFields,
    ) -> MetadataResult<AuthorId>;

    /// Get an author by id.
    async fn get_author(&self, id: AuthorId) -> MetadataResult<Option<AuthorRow>>;

    /// All authors matching the predicate, in insertion order.
    async fn scan_authors(
        &self,
        predicate: &Predicate<AuthorField>,
    ) -> MetadataResult<Vec<AuthorRow>>;

    /// First author, in insertion order, whose field equals `value`.
    async fn find_author_by_field(
        &self,
        field: AuthorField,
        value: FieldValue,
    ) -> MetadataResult<Option<AuthorRow>>;
}
