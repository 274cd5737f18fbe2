//! Account and authentication error types.

use photopin_shared::AppError;
use thiserror::Error;

/// Bearer authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Header absent, blank, or the cleared-cookie placeholder.
    #[error("authentication header missing")]
    MissingCredentials,

    /// Header does not use the `Bearer` scheme.
    #[error("authentication header missing 'Bearer' scheme")]
    MissingScheme,

    /// Header is not exactly `Bearer <key>`.
    #[error("malformed bearer credentials")]
    MalformedCredentials,

    /// No user holds the presented key.
    #[error("no user exists for the specified api key")]
    UnknownApiKey,

    /// Credential store lookup failed.
    #[error("credential store error: {0}")]
    Store(String),
}

/// Registration errors.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Handle failed validation.
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// Handle (or key) already taken.
    #[error("handle already registered: {0}")]
    DuplicateHandle(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl AccountError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials
            | AuthError::MissingScheme
            | AuthError::MalformedCredentials => Self::Unauthenticated(err.to_string()),
            AuthError::UnknownApiKey => Self::Unauthorized(err.to_string()),
            AuthError::Store(msg) => Self::Database(msg),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidHandle(_) | AccountError::DuplicateHandle(_) => {
                Self::Validation(err.to_string())
            }
            AccountError::Repository(msg) => Self::Database(msg),
        }
    }
}
