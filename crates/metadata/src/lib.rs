//! Metadata store abstraction and implementations for Shelf.
//!
//! This crate provides the record side of the catalog:
//! - Book and author records keyed by identity
//! - Field predicates (per-field allow-lists, ANDed together)
//! - Point lookups, predicate scans and first-match lookups

pub mod error;
pub mod models;
pub mod predicate;
pub mod repos;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use models::{AuthorRow, BookRow};
pub use predicate::{AuthorField, BookField, FieldValue, Predicate};
pub use repos::{AuthorRepo, BookRepo};
pub use store::{MetadataStore, SqliteStore};

use shelf_core::config::MetadataConfig;
use std::sync::Arc;

/// Create a metadata store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn MetadataStore>> {
    config.validate().map_err(MetadataError::Config)?;

    match config {
        MetadataConfig::Sqlite {
            path,
            busy_timeout_secs,
        } => {
            let store = SqliteStore::new(path, Some(*busy_timeout_secs)).await?;
            Ok(Arc::new(store) as Arc<dyn MetadataStore>)
        }
    }
}
