//! Photo workflow error types.

use photopin_shared::AppError;
use thiserror::Error;

use crate::content::GatewayError;

/// Photo workflow errors.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// No photo with this content id.
    #[error("photo not found: {0}")]
    NotFound(String),

    /// The photo has no usable name.
    #[error("photo name is required")]
    MissingName,

    /// Stored content id is not well formed.
    #[error("invalid content identifier: {0:?}")]
    InvalidContentId(String),

    /// Upload exceeds the gateway limit.
    #[error("file too large: {size} bytes exceeds maximum {max} bytes")]
    FileTooLarge {
        /// Bytes received.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Gateway operation failed.
    #[error("content gateway error: {0}")]
    Gateway(GatewayError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl PhotoError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(cid: impl Into<String>) -> Self {
        Self::NotFound(cid.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<GatewayError> for PhotoError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::FileTooLarge { size, max } => Self::FileTooLarge { size, max },
            GatewayError::InvalidContentId(id) => Self::InvalidContentId(id),
            other => Self::Gateway(other),
        }
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        match err {
            PhotoError::NotFound(_) => Self::NotFound(err.to_string()),
            PhotoError::MissingName | PhotoError::InvalidContentId(_) => {
                Self::BadRequest(err.to_string())
            }
            PhotoError::FileTooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            PhotoError::Gateway(_) => Self::Upstream(err.to_string()),
            PhotoError::Repository(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_errors_are_classified() {
        let err: PhotoError = GatewayError::file_too_large(10, 5).into();
        assert!(matches!(err, PhotoError::FileTooLarge { size: 10, max: 5 }));

        let err: PhotoError = GatewayError::invalid_content_id("nope").into();
        assert!(matches!(err, PhotoError::InvalidContentId(_)));

        let err: PhotoError = GatewayError::operation("disk full").into();
        assert!(matches!(err, PhotoError::Gateway(_)));
    }

    #[test]
    fn test_status_mapping() {
        let status = |e: PhotoError| AppError::from(e).status_code();

        assert_eq!(status(PhotoError::not_found("abc")), 404);
        assert_eq!(status(PhotoError::MissingName), 400);
        assert_eq!(status(PhotoError::InvalidContentId("x".into())), 400);
        assert_eq!(status(PhotoError::FileTooLarge { size: 2, max: 1 }), 413);
        assert_eq!(
            status(PhotoError::Gateway(GatewayError::operation("down"))),
            500
        );
        assert_eq!(status(PhotoError::repository("locked")), 500);
    }
}
