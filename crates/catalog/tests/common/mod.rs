//! Catalog test utilities.

use bytes::Bytes;
use futures::stream;
use shelf_catalog::Catalog;
use shelf_core::{AuthorDraft, BookDraft};
use shelf_metadata::SqliteStore;
use shelf_storage::{BlobStore, ContentStream, FilesystemBackend};
use std::io;
use std::sync::Arc;
use tempfile::TempDir;

/// A catalog over a temporary SQLite file and blob directory.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestCatalog {
    pub catalog: Catalog,
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestCatalog {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let store = SqliteStore::new(temp_dir.path().join("catalog.db"), None)
            .await
            .expect("Failed to open metadata store");
        let backend = FilesystemBackend::new(temp_dir.path().join("blobs"))
            .await
            .expect("Failed to open blob storage");

        Self {
            catalog: Catalog::new(Arc::new(store), BlobStore::new(Arc::new(backend))),
            temp_dir,
        }
    }

    /// Add a book without content, panicking on failure.
    pub async fn book(&self, name: &str, author: &str) -> shelf_core::BookId {
        self.catalog
            .add_book(book_draft(name, author), None)
            .await
            .expect("Failed to add book")
    }

    /// Add an author, panicking on failure.
    pub async fn author(&self, name: &str, date_of_death: i64) -> shelf_core::AuthorId {
        self.catalog
            .add_author(author_draft(name, date_of_death))
            .await
            .expect("Failed to add author")
    }
}

#[allow(dead_code)]
pub fn book_draft(name: &str, author: &str) -> BookDraft {
    BookDraft {
        name: name.to_string(),
        author: author.to_string(),
        year: "1949".to_string(),
        genre: "fiction".to_string(),
        pages: "328".to_string(),
        publisher: "Secker & Warburg".to_string(),
    }
}

#[allow(dead_code)]
pub fn author_draft(name: &str, date_of_death: i64) -> AuthorDraft {
    AuthorDraft {
        name: name.to_string(),
        description: format!("{name} wrote books"),
        date_of_birth: (date_of_death - 50).to_string(),
        date_of_death: date_of_death.to_string(),
    }
}

/// Present `data` as a content stream of `chunk_size` pieces.
#[allow(dead_code)]
pub fn content(data: &[u8], chunk_size: usize) -> ContentStream<'static> {
    let chunks: Vec<io::Result<Bytes>> = data
        .chunks(chunk_size)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    Box::pin(stream::iter(chunks))
}

/// A content stream that fails after one chunk.
#[allow(dead_code)]
pub fn broken_content() -> ContentStream<'static> {
    Box::pin(stream::iter([
        Ok(Bytes::from_static(b"%PDF-1.4 ")),
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "upload cut short")),
    ]))
}
