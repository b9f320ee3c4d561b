//! Database models mapping to the catalog schema.

use crate::predicate::{AuthorField, BookField, FieldValue, Record};
use shelf_core::{AuthorId, BookId};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// Books
// =============================================================================

/// Book record.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub book_id: Uuid,
    pub name: String,
    /// Author name, matched against `AuthorRow::name`.
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub pages: i64,
    pub publisher: String,
    /// Object key of the attached document. Set at most once, during creation.
    pub content_key: Option<String>,
    pub content_size: Option<i64>,
    pub created_at: OffsetDateTime,
}

impl BookRow {
    pub fn id(&self) -> BookId {
        BookId::from_uuid(self.book_id)
    }

    pub fn has_content(&self) -> bool {
        self.content_key.is_some()
    }
}

impl Record for BookRow {
    type Field = BookField;

    fn value(&self, field: BookField) -> FieldValue {
        match field {
            BookField::Name => self.name.as_str().into(),
            BookField::Author => self.author.as_str().into(),
            BookField::Year => self.year.into(),
            BookField::Genre => self.genre.as_str().into(),
            BookField::Pages => self.pages.into(),
            BookField::Publisher => self.publisher.as_str().into(),
        }
    }
}

// =============================================================================
// Authors
// =============================================================================

/// Author record.
#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub author_id: Uuid,
    pub name: String,
    pub description: String,
    pub date_of_birth: i64,
    pub date_of_death: i64,
    pub created_at: OffsetDateTime,
}

impl AuthorRow {
    pub fn id(&self) -> AuthorId {
        AuthorId::from_uuid(self.author_id)
    }
}

impl Record for AuthorRow {
    type Field = AuthorField;

    fn value(&self, field: AuthorField) -> FieldValue {
        match field {
            AuthorField::Name => self.name.as_str().into(),
            AuthorField::Description => self.description.as_str().into(),
            AuthorField::DateOfBirth => self.date_of_birth.into(),
            AuthorField::DateOfDeath => self.date_of_death.into(),
        }
    }
}
