//! Prometheus metrics for the Shelf server.
//!
//! The `/metrics` endpoint is unauthenticated so Prometheus can scrape it.
//! Metrics hold aggregate counts only, never record ids or names.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Record metrics
pub static BOOKS_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("shelf_books_created_total", "Total number of books added")
        .expect("metric creation failed")
});

pub static AUTHORS_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("shelf_authors_created_total", "Total number of authors added")
        .expect("metric creation failed")
});

pub static PARTIAL_WRITES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "shelf_book_partial_writes_total",
        "Books saved whose content could not be stored",
    )
    .expect("metric creation failed")
});

// Content metrics
pub static CONTENT_BYTES_UPLOADED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "shelf_content_bytes_uploaded_total",
        "Total book content bytes received for storage",
    )
    .expect("metric creation failed")
});

pub static CONTENT_BYTES_SERVED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "shelf_content_bytes_served_total",
        "Total book content bytes streamed to clients",
    )
    .expect("metric creation failed")
});

// Lookup metrics
pub static LOOKUPS_NOT_FOUND: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "shelf_lookups_not_found_total",
            "Lookups that found nothing, by operation",
        ),
        &["operation"],
    )
    .expect("metric creation failed")
});

pub static BOOK_LIST_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "shelf_book_list_duration_seconds",
            "Time taken to resolve a filtered book listing",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
    )
    .expect("metric creation failed")
});

static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(BOOKS_CREATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(AUTHORS_CREATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(PARTIAL_WRITES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(CONTENT_BYTES_UPLOADED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(CONTENT_BYTES_SERVED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(LOOKUPS_NOT_FOUND.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(BOOK_LIST_DURATION.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

/// Count a lookup that found nothing.
pub fn record_not_found(operation: &str) {
    LOOKUPS_NOT_FOUND.with_label_values(&[operation]).inc();
}
