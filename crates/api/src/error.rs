//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use carteira_core::records::RecordError;
use carteira_shared::AppError;
use carteira_store::StoreError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An application error rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let message = match &self.0 {
            AppError::Unauthorized(m)
            | AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Storage(m)
            | AppError::ExternalService(m)
            | AppError::Internal(m) => m.clone(),
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code().to_ascii_lowercase(),
                "message": message
            })),
        )
            .into_response()
    }
}
