//! Book catalog for Shelf.
//!
//! Combines the metadata store and the blob store behind a single facade:
//! filtered listing (including the author date-of-death lookup), book detail
//! joined with its author, content download, and record creation.

pub mod catalog;
pub mod error;
pub mod query;
pub mod views;

pub use catalog::{BookContent, Catalog};
pub use error::{CatalogError, CatalogResult, ErrorKind};
pub use query::{BookFilter, compile};
pub use views::{BookDetail, BookSummary};
