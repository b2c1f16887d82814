use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use qrdrop_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::qr;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Opaque token resolving to the uploaded object until it expires.
    pub token: String,
    pub download_url: String,
    /// Base64-encoded PNG QR image of the download URL.
    pub qr_image: String,
    pub expires_at: DateTime<Utc>,
}

/// Upload handler
///
/// Accepts one file in a multipart request, stores it with the configured
/// TTL, and returns the access token plus its scannable form.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "transfer",
    responses(
        (status = 200, description = "File stored, token issued", body = UploadResponse),
        (status = 400, description = "Missing or empty file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut file_part = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or("upload.bin")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file part: {}", e)))?;

        file_part = Some((filename, content_type, data));
        break;
    }

    let Some((filename, content_type, data)) = file_part else {
        return Err(AppError::InvalidInput("No file provided".to_string()).into());
    };

    let receipt = state.transfer.upload(data, &filename, &content_type).await?;
    let qr_image = qr::render_png_base64(&receipt.download_url)?;

    Ok(Json(UploadResponse {
        token: receipt.token,
        download_url: receipt.download_url,
        qr_image,
        expires_at: receipt.expires_at,
    }))
}
