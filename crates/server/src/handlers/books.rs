//! Book handlers: listing, detail, download and creation.

use crate::error::{ApiError, ApiResult};
use crate::handlers::{DataResponse, MessageResponse, raw_numeric, read_json};
use crate::metrics::{
    BOOK_LIST_DURATION, BOOKS_CREATED, CONTENT_BYTES_SERVED, CONTENT_BYTES_UPLOADED,
    PARTIAL_WRITES, record_not_found,
};
use crate::state::AppState;
use axum::Json;
use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::extract::multipart::MultipartError;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use serde::Deserialize;
use serde_json::{Map, Value};
use shelf_catalog::{BookDetail, BookFilter, BookSummary, CatalogError, ErrorKind};
use shelf_core::{BookDraft, BookId, parse_numeric};
use shelf_storage::ContentStream;
use std::io;

/// Multipart part holding the document.
const CONTENT_PART: &str = "pdf_document";

/// Multipart part holding the book fields as one JSON object.
const BOOK_PART: &str = "book";

/// Book fields that may also arrive as individual multipart parts.
const BOOK_FIELDS: [&str; 6] = ["name", "author", "year", "genre", "pages", "publisher"];

/// Book fields as sent by clients. Numbers may be strings or integers.
#[derive(Debug, Deserialize)]
struct BookPayload {
    name: String,
    author: String,
    #[serde(deserialize_with = "raw_numeric")]
    year: String,
    genre: String,
    #[serde(deserialize_with = "raw_numeric")]
    pages: String,
    publisher: String,
}

impl From<BookPayload> for BookDraft {
    fn from(payload: BookPayload) -> Self {
        BookDraft {
            name: payload.name,
            author: payload.author,
            year: payload.year,
            genre: payload.genre,
            pages: payload.pages,
            publisher: payload.publisher,
        }
    }
}

/// Build a filter from query pairs.
///
/// Keys may be repeated and may carry a `[]` suffix (`author[]=a&author[]=b`).
/// Unknown keys are ignored.
pub fn parse_book_filter(pairs: Vec<(String, String)>) -> ApiResult<BookFilter> {
    let mut filter = BookFilter::default();
    for (key, value) in pairs {
        match key.strip_suffix("[]").unwrap_or(&key) {
            "name" => filter.name.push(value),
            "author" => filter.author.push(value),
            "genre" => filter.genre.push(value),
            "publisher" => filter.publisher.push(value),
            "date_of_death" => filter
                .date_of_death
                .push(parse_numeric("date_of_death", &value).map_err(CatalogError::from)?),
            other => tracing::debug!(key = %other, "ignoring unknown filter key"),
        }
    }
    Ok(filter)
}

fn parse_book_id(raw: &str) -> ApiResult<BookId> {
    BookId::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Count not-found outcomes of `operation` before converting the error.
fn observe(operation: &'static str) -> impl FnOnce(CatalogError) -> ApiError {
    move |err| {
        if err.kind() == ErrorKind::NotFound {
            record_not_found(operation);
        }
        err.into()
    }
}

/// GET /books - List books, optionally filtered.
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<DataResponse<Vec<BookSummary>>>> {
    let filter = parse_book_filter(params)?;

    let timer = BOOK_LIST_DURATION.start_timer();
    let books = state.catalog.list_books(&filter).await?;
    timer.observe_duration();

    Ok(Json(DataResponse::new(books)))
}

/// GET /books/{id} - Book with its author's details.
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<BookDetail>>> {
    let id = parse_book_id(&id)?;
    let detail = state
        .catalog
        .get_book_detail(id)
        .await
        .map_err(observe("get_book_detail"))?;
    Ok(Json(DataResponse::new(detail)))
}

/// GET /books/{id}/download - Stream the book's document.
pub async fn download_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_book_id(&id)?;
    let content = state
        .catalog
        .download_book_content(id)
        .await
        .map_err(observe("download_book_content"))?;

    let stream = content
        .stream
        .inspect_ok(|chunk| CONTENT_BYTES_SERVED.inc_by(chunk.len() as u64))
        .inspect_err(move |e| {
            tracing::error!(book_id = %id, error = %e, "content streaming failed mid-transfer")
        });

    let mut response = (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{id}.pdf\"")),
        ],
        Body::from_stream(stream),
    )
        .into_response();
    if let Some(size) = content.size {
        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(size));
    }
    Ok(response)
}

/// POST /add_book - Create a book, optionally with its document.
///
/// Accepts either a JSON body with the book fields, or `multipart/form-data`
/// carrying the fields (as a `book` JSON part or as one part per field)
/// followed by an optional `pdf_document` part. The document is streamed
/// into storage as it arrives, so it must be the last part.
pub async fn add_book(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<MessageResponse>> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let book_id = if is_multipart {
        let mut multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        add_book_multipart(&state, &mut multipart).await?
    } else {
        let payload: BookPayload = read_json(req).await?;
        record_add_book(state.catalog.add_book(payload.into(), None).await)?
    };

    Ok(Json(MessageResponse::created(
        "Book saved successfully!",
        book_id,
    )))
}

async fn add_book_multipart(state: &AppState, multipart: &mut Multipart) -> ApiResult<BookId> {
    let mut fields = Map::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            BOOK_PART => {
                let text = field.text().await.map_err(bad_multipart)?;
                match serde_json::from_str(&text) {
                    Ok(Value::Object(map)) => fields.extend(map),
                    Ok(_) => {
                        return Err(ApiError::BadRequest(
                            "'book' part must be a JSON object".to_string(),
                        ));
                    }
                    Err(e) => {
                        return Err(ApiError::BadRequest(format!("invalid 'book' part: {e}")));
                    }
                }
            }
            CONTENT_PART => {
                let draft = book_draft(fields)?;
                let content: ContentStream<'_> = Box::pin(
                    field
                        .inspect_ok(|chunk| CONTENT_BYTES_UPLOADED.inc_by(chunk.len() as u64))
                        .map_err(io::Error::other),
                );
                return record_add_book(state.catalog.add_book(draft, Some(content)).await);
            }
            other if BOOK_FIELDS.contains(&other) => {
                let text = field.text().await.map_err(bad_multipart)?;
                fields.insert(other.to_string(), Value::String(text));
            }
            other => tracing::debug!(part = %other, "ignoring unknown multipart part"),
        }
    }

    record_add_book(state.catalog.add_book(book_draft(fields)?, None).await)
}

fn book_draft(fields: Map<String, Value>) -> ApiResult<BookDraft> {
    serde_json::from_value::<BookPayload>(Value::Object(fields))
        .map(BookDraft::from)
        .map_err(|e| ApiError::BadRequest(format!("invalid book fields: {e}")))
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("invalid multipart body: {}", err.body_text()))
}

/// Update creation metrics. A partial write still created the book.
fn record_add_book(result: Result<BookId, CatalogError>) -> ApiResult<BookId> {
    match result {
        Ok(book_id) => {
            BOOKS_CREATED.inc();
            Ok(book_id)
        }
        Err(err) => {
            if err.saved_book().is_some() {
                BOOKS_CREATED.inc();
                PARTIAL_WRITES.inc();
            }
            Err(err.into())
        }
    }
}
