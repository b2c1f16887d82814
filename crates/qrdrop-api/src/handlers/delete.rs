use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Delete handler
///
/// Frees an object ahead of its deadline. Idempotent: deleting an unknown,
/// already-deleted, or malformed token still succeeds.
#[utoipa::path(
    delete,
    path = "/files/{token}",
    tag = "transfer",
    params(
        ("token" = String, Path, description = "Access token from an upload response")
    ),
    responses(
        (status = 200, description = "Object no longer retrievable"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<Value>, HttpAppError> {
    state.transfer.delete(&token).await?;
    Ok(Json(json!({ "message": "File deleted" })))
}
