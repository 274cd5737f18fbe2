//! Account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted handle, in characters.
pub const MAX_HANDLE_LEN: usize = 64;

/// A registered user. Never carries the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique display name.
    pub handle: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Requested handle.
    pub handle: String,
    /// Optional contact email.
    pub email: Option<String>,
}

/// Record handed to the credential store.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Validated handle.
    pub handle: String,
    /// SHA-256 hex digest of the API key.
    pub api_key_hash: String,
    /// Optional contact email.
    pub email: Option<String>,
}

/// Result of registration: the user plus the only copy of the plaintext key.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    /// The stored user.
    pub user: User,
    /// Plaintext API key.
    pub api_key: String,
}
