//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; domain errors
//! convert into `HttpAppError` and render consistently (status, JSON body,
//! logging). The conversion is the single place where internal error kinds
//! map to the external contract, which is how every fetch-side failure ends
//! up as the same opaque 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use qrdrop_core::{AppError, LogLevel};
use qrdrop_service::{TransferError, ValidationError};
use qrdrop_store::StoreError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (type from qrdrop-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

impl From<StoreError> for HttpAppError {
    fn from(err: StoreError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<TransferError> for HttpAppError {
    fn from(err: TransferError) -> Self {
        let app = match err {
            TransferError::Validation(ValidationError::EmptyPayload) => {
                AppError::InvalidInput("No file provided or file is empty".to_string())
            }
            TransferError::Validation(ValidationError::PayloadTooLarge { size, max }) => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            TransferError::NotFound => {
                AppError::NotFound("token resolved to no live object".to_string())
            }
            TransferError::Store(e) => e.into(),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_not_found_maps_to_opaque_404() {
        let HttpAppError(app) = TransferError::NotFound.into();
        assert_eq!(app.http_status_code(), 404);
        assert_eq!(app.client_message(), "Not found");
    }

    #[test]
    fn expired_and_malformed_render_identically() {
        let HttpAppError(from_transfer) = TransferError::NotFound.into();
        let HttpAppError(from_store) = StoreError::NotFound("blob gone".to_string()).into();

        assert_eq!(
            from_transfer.client_message(),
            from_store.client_message()
        );
        assert_eq!(
            from_transfer.http_status_code(),
            from_store.http_status_code()
        );
    }

    #[test]
    fn oversize_maps_to_413_with_sizes() {
        let err = TransferError::Validation(ValidationError::PayloadTooLarge {
            size: 2048,
            max: 1024,
        });
        let HttpAppError(app) = err.into();
        assert_eq!(app.http_status_code(), 413);
        assert!(app.client_message().contains("2048"));
        assert!(app.client_message().contains("1024"));
    }

    #[test]
    fn empty_payload_maps_to_400() {
        let err = TransferError::Validation(ValidationError::EmptyPayload);
        let HttpAppError(app) = err.into();
        assert_eq!(app.http_status_code(), 400);
    }
}
