//! User accounts: registration and bearer-token authentication.
//!
//! This module provides:
//! - API key generation and at-rest hashing
//! - Bearer header parsing
//! - The credential store seam implemented by the db crate
//! - Registration and authentication workflows

mod api_key;
mod bearer;
mod error;
mod service;
mod types;

pub use api_key::{API_KEY_ALPHABET, API_KEY_LEN, generate_api_key, hash_api_key};
pub use bearer::extract_bearer_token;
pub use error::{AccountError, AuthError};
pub use service::{AccountService, CredentialStore};
pub use types::{MAX_HANDLE_LEN, NewUser, RegisterInput, RegisteredUser, User};
