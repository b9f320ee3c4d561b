//! Metadata store trait and implementations.

use crate::error::{MetadataError, MetadataResult};
use crate::predicate::{Field, Predicate};
use crate::repos::{AuthorRepo, BookRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Pool, QueryBuilder, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore: BookRepo + AuthorRepo + Send + Sync {
    /// Create tables and indexes if they do not exist.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based metadata store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) a SQLite store at `path` and apply the schema.
    pub async fn new(path: impl AsRef<Path>, busy_timeout_secs: Option<u64>) -> MetadataResult<Self> {
        let path = path.as_ref();
        let busy_timeout = Duration::from_secs(busy_timeout_secs.unwrap_or(5));

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            // A single long-lived connection: SQLite serializes writers anyway,
            // and an in-memory database lives only as long as its connection.
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(path = %path.display(), "SQLite metadata store opened");
        Ok(store)
    }

    /// Select rows from `table` matching `predicate`, in insertion order.
    async fn scan<R, F>(
        &self,
        table: &'static str,
        predicate: &Predicate<F>,
        limit: Option<i64>,
    ) -> MetadataResult<Vec<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
        F: Field,
    {
        if predicate.is_unsatisfiable() {
            tracing::debug!(table, "predicate has an empty clause, skipping query");
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT * FROM {table}"));
        predicate.push_where(&mut qb);
        qb.push(" ORDER BY rowid");
        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }

        let rows = qb.build_query_as::<R>().fetch_all(&self.pool).await?;
        tracing::debug!(
            table,
            clauses = predicate.clauses().len(),
            rows = rows.len(),
            "scan complete"
        );
        Ok(rows)
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use crate::predicate::{AuthorField, BookField, FieldValue};
    use shelf_core::{AuthorFields, AuthorId, BookFields, BookId};
    use time::OffsetDateTime;

    #[async_trait]
    impl BookRepo for SqliteStore {
        async fn put_book(&self, id: Option<BookId>, book: &BookFields) -> MetadataResult<BookId> {
            book.validate()?;
            let id = id.unwrap_or_else(BookId::generate);

            sqlx::query(
                r#"
                INSERT INTO books (
                    book_id, name, author, year, genre, pages, publisher,
                    content_key, content_size, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, NULL, NULL, ?)
                "#,
            )
            .bind(*id.as_uuid())
            .bind(&book.name)
            .bind(&book.author)
            .bind(book.year)
            .bind(&book.genre)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(OffsetDateTime::now_utc())
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::from_insert(e, || format!("book_id {id} already exists")))?;

            Ok(id)
        }

        async fn get_book(&self, id: BookId) -> MetadataResult<Option<BookRow>> {
            let row = sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE book_id = ?")
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn scan_books(
            &self,
            predicate: &Predicate<BookField>,
        ) -> MetadataResult<Vec<BookRow>> {
            self.scan("books", predicate, None).await
        }

        async fn find_book_by_field(
            &self,
            field: BookField,
            value: FieldValue,
        ) -> MetadataResult<Option<BookRow>> {
            let predicate = Predicate::all().eq(field, value);
            let rows: Vec<BookRow> = self.scan("books", &predicate, Some(1)).await?;
            Ok(rows.into_iter().next())
        }

        async fn attach_content(&self, id: BookId, key: &str, size: u64) -> MetadataResult<()> {
            let size = i64::try_from(size).map_err(|_| {
                MetadataError::Internal(format!("content size {size} exceeds i64 range"))
            })?;

            let result = sqlx::query(
                "UPDATE books SET content_key = ?, content_size = ? WHERE book_id = ? AND content_key IS NULL",
            )
            .bind(key)
            .bind(size)
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return match self.get_book(id).await? {
                    Some(_) => Err(MetadataError::AlreadyExists(format!(
                        "book_id {id} already has content attached"
                    ))),
                    None => Err(MetadataError::NotFound(format!("book_id {id} not found"))),
                };
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AuthorRepo for SqliteStore {
        async fn put_author(
            &self,
            id: Option<AuthorId>,
            author: &AuthorFields,
        ) -> MetadataResult<AuthorId> {
            let id = id.unwrap_or_else(AuthorId::generate);

            sqlx::query(
                r#"
                INSERT INTO authors (
                    author_id, name, description, date_of_birth, date_of_death, created_at
                ) VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(*id.as_uuid())
            .bind(&author.name)
            .bind(&author.description)
            .bind(author.date_of_birth)
            .bind(author.date_of_death)
            .bind(OffsetDateTime::now_utc())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                MetadataError::from_insert(e, || format!("author_id {id} already exists"))
            })?;

            Ok(id)
        }

        async fn get_author(&self, id: AuthorId) -> MetadataResult<Option<AuthorRow>> {
            let row = sqlx::query_as::<_, AuthorRow>("SELECT * FROM authors WHERE author_id = ?")
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn scan_authors(
            &self,
            predicate: &Predicate<AuthorField>,
        ) -> MetadataResult<Vec<AuthorRow>> {
            self.scan("authors", predicate, None).await
        }

        async fn find_author_by_field(
            &self,
            field: AuthorField,
            value: FieldValue,
        ) -> MetadataResult<Option<AuthorRow>> {
            let predicate = Predicate::all().eq(field, value);
            let rows: Vec<AuthorRow> = self.scan("authors", &predicate, Some(1)).await?;
            Ok(rows.into_iter().next())
        }
    }
}

const SCHEMA_SQL: &str = r#"
-- Authors. `name` is the join key used by books.author.
CREATE TABLE IF NOT EXISTS authors (
    author_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    date_of_birth INTEGER NOT NULL,
    date_of_death INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(name);
CREATE INDEX IF NOT EXISTS idx_authors_date_of_death ON authors(date_of_death);

-- Books. content_key is written once, right after the row, when a document is supplied.
CREATE TABLE IF NOT EXISTS books (
    book_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL CHECK (year >= 0),
    genre TEXT NOT NULL,
    pages INTEGER NOT NULL CHECK (pages > 0),
    publisher TEXT NOT NULL,
    content_key TEXT,
    content_size INTEGER,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_books_name ON books(name);
CREATE INDEX IF NOT EXISTS idx_books_author ON books(author);
CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre);
CREATE INDEX IF NOT EXISTS idx_books_publisher ON books(publisher);
"#;
