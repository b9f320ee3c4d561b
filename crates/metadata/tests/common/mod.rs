//! Metadata store test utilities.

use shelf_core::{AuthorFields, BookFields};
use shelf_metadata::{MetadataResult, MetadataStore, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

/// A test metadata store wrapper that cleans up on drop.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestMetadata {
    pub store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestMetadata {
    /// Create a new test metadata store backed by a temporary SQLite file.
    pub async fn new() -> MetadataResult<Self> {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let store = SqliteStore::new(&db_path, None).await?;

        Ok(Self {
            store: Arc::new(store),
            _temp_dir: temp_dir,
        })
    }

    /// Create a new in-memory SQLite store.
    pub async fn in_memory() -> MetadataResult<Self> {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let store = SqliteStore::new(":memory:", None).await?;

        Ok(Self {
            store: Arc::new(store),
            _temp_dir: temp_dir,
        })
    }

    /// Get the store as a trait object.
    pub fn store(&self) -> Arc<dyn MetadataStore> {
        self.store.clone()
    }
}

/// Book fields with the given name and author and plausible defaults.
#[allow(dead_code)]
pub fn book(name: &str, author: &str) -> BookFields {
    BookFields {
        name: name.to_string(),
        author: author.to_string(),
        year: 1950,
        genre: "fiction".to_string(),
        pages: 250,
        publisher: "Penguin".to_string(),
    }
}

/// Author fields with the given name and date of death.
#[allow(dead_code)]
pub fn author(name: &str, date_of_death: i64) -> AuthorFields {
    AuthorFields {
        name: name.to_string(),
        description: format!("{name} wrote books"),
        date_of_birth: date_of_death - 50,
        date_of_death,
    }
}
