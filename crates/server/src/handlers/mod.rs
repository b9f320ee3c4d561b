//! HTTP request handlers.

pub mod authors;
pub mod books;
pub mod system;

pub use authors::*;
pub use books::*;
pub use system::*;

use crate::error::{ApiError, ApiResult};
use axum::extract::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum size of a JSON request body (1 MiB).
pub const MAX_JSON_BODY_SIZE: usize = 1024 * 1024;

/// Successful response carrying data.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { status: true, data }
    }
}

/// Successful write response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: bool,
    pub message: &'static str,
    /// Id of the created record.
    pub id: String,
}

impl MessageResponse {
    pub fn created(message: &'static str, id: impl ToString) -> Self {
        Self {
            status: true,
            message,
            id: id.to_string(),
        }
    }
}

/// Read and parse a JSON body regardless of its declared content type.
pub(crate) async fn read_json<T: DeserializeOwned>(req: Request) -> ApiResult<T> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_JSON_BODY_SIZE)
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read body: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Text(String),
    Integer(i64),
}

/// Accept a numeric field sent either as a string or as a JSON integer,
/// keeping it as text for the catalog to validate.
pub(crate) fn raw_numeric<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNumber::deserialize(deserializer)? {
        RawNumber::Text(text) => text,
        RawNumber::Integer(n) => n.to_string(),
    })
}
