//! Content gateway error types.

use thiserror::Error;

/// Content gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Object exceeds the configured maximum.
    #[error("object size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge {
        /// Bytes received before giving up.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Identifier is not a well-formed content id.
    #[error("invalid content identifier: {0:?}")]
    InvalidContentId(String),

    /// Object not present in the store.
    #[error("object not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Backend configuration error.
    #[error("pin store configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("pin store operation failed: {0}")]
    Operation(String),
}

impl GatewayError {
    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create an invalid content id error.
    #[must_use]
    pub fn invalid_content_id(id: impl Into<String>) -> Self {
        Self::InvalidContentId(id.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

impl From<opendal::Error> for GatewayError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Operation(format!("pin record: {err}"))
    }
}
