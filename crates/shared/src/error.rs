//! Application-wide error types.

use thiserror::Error;


/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// No credential, or a malformed one, was presented.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// A credential was presented but matches no known identity.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Malformed client input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeds the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Input rejected by validation or by a store constraint.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The content gateway failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) | Self::Unauthorized(_) => 401,
            Self::BadRequest(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::Upstream(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true when the caller cannot fix the request by changing it.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
