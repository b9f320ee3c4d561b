//! Core domain types and shared logic for the Shelf catalog.
//!
//! This crate defines the data model used across all other crates:
//! - Record identities for books and authors
//! - Raw drafts and their validated field sets
//! - Configuration for the server, metadata store and blob storage

pub mod config;
pub mod error;
pub mod id;
pub mod record;

pub use error::{Error, Result};
pub use id::{AuthorId, BookId};
pub use record::{AuthorDraft, AuthorFields, BookDraft, BookFields, parse_numeric};
