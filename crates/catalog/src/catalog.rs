//! The catalog facade over the metadata store and blob store.

use crate::error::{CatalogError, CatalogResult};
use crate::query::{self, BookFilter};
use crate::views::{BookDetail, BookSummary};
use shelf_core::{AuthorDraft, AuthorFields, AuthorId, BookDraft, BookFields, BookId};
use shelf_metadata::{AuthorField, MetadataStore};
use shelf_storage::{BlobStore, ByteStream, ContentStream};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A book's content, ready to be streamed to a caller.
pub struct BookContent {
    /// Content length when known.
    pub size: Option<u64>,
    pub stream: ByteStream,
}

/// Books and authors, with optional per-book content.
///
/// Both stores are injected; the catalog holds no other state.
#[derive(Clone)]
pub struct Catalog {
    metadata: Arc<dyn MetadataStore>,
    blobs: BlobStore,
}

impl Catalog {
    pub fn new(metadata: Arc<dyn MetadataStore>, blobs: BlobStore) -> Self {
        Self { metadata, blobs }
    }

    pub fn metadata(&self) -> &Arc<dyn MetadataStore> {
        &self.metadata
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    /// Books matching `filter`, in insertion order.
    #[instrument(skip(self))]
    pub async fn list_books(&self, filter: &BookFilter) -> CatalogResult<Vec<BookSummary>> {
        let predicate = query::compile(filter, &*self.metadata).await?;
        let rows = self.metadata.scan_books(&predicate).await?;
        Ok(rows.into_iter().map(BookSummary::from).collect())
    }

    /// A book joined with the first author whose name matches the book's author.
    ///
    /// A missing book and a book whose author is unknown are both `NotFound`.
    #[instrument(skip(self))]
    pub async fn get_book_detail(&self, id: BookId) -> CatalogResult<BookDetail> {
        let book = self
            .metadata
            .get_book(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("book {id}")))?;

        let author = self
            .metadata
            .find_author_by_field(AuthorField::Name, book.author.as_str().into())
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!("author {:?} of book {id}", book.author))
            })?;

        Ok(BookDetail::new(book, author))
    }

    /// Stream the content attached to a book.
    #[instrument(skip(self))]
    pub async fn download_book_content(&self, id: BookId) -> CatalogResult<BookContent> {
        let book = self
            .metadata
            .get_book(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("book {id}")))?;

        if !book.has_content() {
            return Err(CatalogError::NotFound(format!("content of book {id}")));
        }

        let stream = self.blobs.retrieve(id).await?;
        Ok(BookContent {
            size: book.content_size.and_then(|s| u64::try_from(s).ok()),
            stream,
        })
    }

    /// Validate and persist a book, then store its content if any.
    ///
    /// The book is committed before its content is written. If the content
    /// cannot be stored the book stays in the catalog without content and the
    /// error is `PartialWrite` carrying its id.
    #[instrument(skip(self, draft, content), fields(name = %draft.name, with_content = content.is_some()))]
    pub async fn add_book(
        &self,
        draft: BookDraft,
        content: Option<ContentStream<'_>>,
    ) -> CatalogResult<BookId> {
        let fields = BookFields::try_from(draft)?;
        let book_id = self.metadata.put_book(None, &fields).await?;
        info!(%book_id, "book saved");

        let Some(content) = content else {
            return Ok(book_id);
        };

        let stored = match self.blobs.store(book_id, content).await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(%book_id, error = %err, "book saved without content");
                return Err(CatalogError::PartialWrite {
                    book_id,
                    source: Box::new(err),
                });
            }
        };

        if let Err(err) = self
            .metadata
            .attach_content(book_id, &stored.key, stored.size)
            .await
        {
            warn!(%book_id, error = %err, "content stored but not attached");
            return Err(CatalogError::PartialWrite {
                book_id,
                source: Box::new(err),
            });
        }

        info!(%book_id, size = stored.size, "book content stored");
        Ok(book_id)
    }

    /// Validate and persist an author.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_author(&self, draft: AuthorDraft) -> CatalogResult<AuthorId> {
        let fields = AuthorFields::try_from(draft)?;
        let author_id = self.metadata.put_author(None, &fields).await?;
        info!(%author_id, "author saved");
        Ok(author_id)
    }

    /// Check both stores.
    pub async fn health_check(&self) -> CatalogResult<()> {
        self.metadata
            .health_check()
            .await
            .map_err(CatalogError::Metadata)?;
        self.blobs
            .health_check()
            .await
            .map_err(CatalogError::Storage)?;
        Ok(())
    }
}
