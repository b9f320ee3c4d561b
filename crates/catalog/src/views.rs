//! Read models returned by the catalog.

use serde::Serialize;
use shelf_core::BookId;
use shelf_metadata::{AuthorRow, BookRow};

/// A book without its content or author details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub name: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub pages: i64,
    pub publisher: String,
}

impl From<BookRow> for BookSummary {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id(),
            name: row.name,
            author: row.author,
            year: row.year,
            genre: row.genre,
            pages: row.pages,
            publisher: row.publisher,
        }
    }
}

/// A book joined with its author's details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: BookSummary,
    pub author_description: String,
    pub author_date_of_birth: i64,
    pub author_date_of_death: i64,
}

impl BookDetail {
    pub fn new(book: BookRow, author: AuthorRow) -> Self {
        Self {
            book: book.into(),
            author_description: author.description,
            author_date_of_birth: author.date_of_birth,
            author_date_of_death: author.date_of_death,
        }
    }
}
