use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
};
use futures::TryStreamExt;
use qrdrop_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Download handler
///
/// Streams the payload back with the metadata captured at upload time.
/// Malformed, unknown, and expired tokens all get the same 404.
#[utoipa::path(
    get,
    path = "/download/{token}",
    tag = "transfer",
    params(
        ("token" = String, Path, description = "Access token from an upload response")
    ),
    responses(
        (status = 200, description = "Payload bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Response<Body>, HttpAppError> {
    let fetched = state.transfer.fetch(&token).await?;
    let meta = fetched.meta;

    let stream = fetched
        .stream
        .map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, meta.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", meta.filename),
        )
        .header(header::CONTENT_LENGTH, meta.size_bytes)
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
