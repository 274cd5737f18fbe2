//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use photopin_shared::AppError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code such as `NOT_FOUND`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error wrapping the application taxonomy.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        }

        let body = ErrorBody {
            error: self.0.error_code().to_string(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
