//! HTTP API server for the Shelf book catalog.
//!
//! This crate provides the HTTP surface over [`shelf_catalog::Catalog`]:
//! - Filtered book listing and book detail
//! - Document download streaming
//! - Book and author creation (JSON or multipart with a document)
//! - Health and Prometheus endpoints

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
