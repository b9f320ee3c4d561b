//! Server test utilities.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use shelf_catalog::Catalog;
use shelf_core::config::AppConfig;
use shelf_metadata::{MetadataStore, SqliteStore};
use shelf_server::{AppState, create_router};
use shelf_storage::{BlobStore, FilesystemBackend};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with temporary storage.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut config = AppConfig::for_testing(temp_dir.path());
        modifier(&mut config);

        let storage = shelf_storage::from_config(&config.storage)
            .await
            .expect("Failed to create storage backend");
        let metadata = shelf_metadata::from_config(&config.metadata)
            .await
            .expect("Failed to create metadata store");

        let catalog = Catalog::new(metadata, BlobStore::new(storage));
        let state = AppState::new(config, catalog).with_hostname("test-host");
        let router = create_router(state.clone());

        Self {
            router,
            state,
            temp_dir,
        }
    }

    /// A server whose blob storage rejects every write.
    #[cfg(unix)]
    pub async fn with_broken_storage() -> Self {
        use std::os::unix::fs::symlink;

        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let outside = temp_dir.path().join("outside");
        let blobs = temp_dir.path().join("blobs");
        std::fs::create_dir_all(&outside).expect("Failed to create directory");
        std::fs::create_dir_all(&blobs).expect("Failed to create directory");
        // Every book key lives under books/, which escapes the storage root.
        symlink(&outside, blobs.join("books")).expect("Failed to create symlink");

        let config = AppConfig::for_testing(temp_dir.path());
        let storage = FilesystemBackend::new(&blobs)
            .await
            .expect("Failed to create storage backend");
        let metadata: Arc<dyn MetadataStore> = Arc::new(
            SqliteStore::new(temp_dir.path().join("catalog.db"), None)
                .await
                .expect("Failed to create metadata store"),
        );

        let catalog = Catalog::new(metadata, BlobStore::new(Arc::new(storage)));
        let state = AppState::new(config, catalog).with_hostname("test-host");
        let router = create_router(state.clone());

        Self {
            router,
            state,
            temp_dir,
        }
    }

    /// Get access to the underlying metadata.
    pub fn metadata(&self) -> Arc<dyn MetadataStore> {
        self.state.catalog.metadata().clone()
    }

    /// Send a request and return the status and raw body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }

    /// Send a request and parse the body as JSON.
    pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(request).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.json(
            Request::post(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    /// Add an author through the API, returning its id.
    pub async fn add_author(&self, name: &str, date_of_death: &str) -> String {
        let (status, body) = self
            .post_json("/add_author", &super::author_json(name, date_of_death))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Add a book without content through the API, returning its id.
    pub async fn add_book(&self, name: &str, author: &str) -> String {
        let (status, body) = self
            .post_json("/add_book", &super::book_json(name, author))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}
