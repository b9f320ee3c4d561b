//! Author handlers.

use crate::error::ApiResult;
use crate::handlers::{MessageResponse, raw_numeric, read_json};
use crate::metrics::AUTHORS_CREATED;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use serde::Deserialize;
use shelf_core::AuthorDraft;

/// Author fields as sent by clients. Dates may be strings or integers.
#[derive(Debug, Deserialize)]
struct AuthorPayload {
    name: String,
    description: String,
    #[serde(deserialize_with = "raw_numeric")]
    date_of_birth: String,
    #[serde(deserialize_with = "raw_numeric")]
    date_of_death: String,
}

/// POST /add_author - Create an author from a JSON body.
pub async fn add_author(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<MessageResponse>> {
    let payload: AuthorPayload = read_json(req).await?;
    let draft = AuthorDraft {
        name: payload.name,
        description: payload.description,
        date_of_birth: payload.date_of_birth,
        date_of_death: payload.date_of_death,
    };

    let author_id = state.catalog.add_author(draft).await?;
    AUTHORS_CREATED.inc();

    Ok(Json(MessageResponse::created(
        "Author saved successfully!",
        author_id,
    )))
}
