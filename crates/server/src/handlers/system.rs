//! Index and health handlers.

use crate::error::ApiResult;
use crate::handlers::DataResponse;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Index response.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub status: bool,
    pub message: String,
}

/// GET / - Report which host is serving requests.
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        status: true,
        message: format!("Book storage is running inside {} pod", state.hostname),
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage_backend: &'static str,
}

/// GET /v1/health - Health check endpoint for probes and load balancers.
///
/// Fails when either the metadata store or the blob storage is unreachable.
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<HealthResponse>>> {
    state.catalog.health_check().await?;

    Ok(Json(DataResponse::new(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage_backend: state.catalog.blobs().backend_name(),
    })))
}
