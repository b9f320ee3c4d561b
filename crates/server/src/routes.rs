//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route("/books", get(handlers::list_books))
        .route("/books/{id}", get(handlers::get_book))
        .route("/books/{id}/download", get(handlers::download_book))
        .route("/add_book", post(handlers::add_book))
        .route("/add_author", post(handlers::add_author));

    let mut router = Router::new()
        // Diagnostic index and health check (unauthenticated for probes)
        .route("/", get(handlers::index))
        .route("/v1/health", get(handlers::health_check))
        .merge(catalog_routes);

    // The /metrics endpoint should be network-restricted to the scraper.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    router
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
