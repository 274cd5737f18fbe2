//! Account service implementation.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use super::api_key::{generate_api_key, hash_api_key};
use super::bearer::extract_bearer_token;
use super::error::{AccountError, AuthError};
use super::types::{MAX_HANDLE_LEN, NewUser, RegisterInput, RegisteredUser, User};

/// Repository trait for user persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait CredentialStore: Send + Sync {
    /// Create a new user record.
    ///
    /// Must fail with [`AccountError::DuplicateHandle`] on a uniqueness violation.
    fn create_user(
        &self,
        input: NewUser,
    ) -> impl Future<Output = Result<User, AccountError>> + Send;

    /// Find the user whose API key hashes to `api_key_hash`.
    fn find_by_api_key_hash(
        &self,
        api_key_hash: &str,
    ) -> impl Future<Output = Result<Option<User>, AccountError>> + Send;
}

/// Registration and authentication workflows.
pub struct AccountService<S: CredentialStore> {
    store: Arc<S>,
}

impl<S: CredentialStore> AccountService<S> {
    /// Create a new account service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user and mint its API key.
    ///
    /// The returned key is the only plaintext copy; the store keeps a hash.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The handle is blank or longer than [`MAX_HANDLE_LEN`]
    /// - The handle is already registered
    /// - The store fails
    pub async fn register(&self, input: RegisterInput) -> Result<RegisteredUser, AccountError> {
        let handle = input.handle.trim();
        if handle.is_empty() {
            return Err(AccountError::InvalidHandle("handle is required".to_string()));
        }
        if handle.chars().count() > MAX_HANDLE_LEN {
            return Err(AccountError::InvalidHandle(format!(
                "handle must be at most {MAX_HANDLE_LEN} characters"
            )));
        }

        let api_key = generate_api_key();
        let user = self
            .store
            .create_user(NewUser {
                handle: handle.to_string(),
                api_key_hash: hash_api_key(&api_key),
                email: input.email.filter(|e| !e.trim().is_empty()),
            })
            .await?;

        info!(user_id = %user.id, handle = %user.handle, "User registered");

        Ok(RegisteredUser { user, api_key })
    }

    /// Resolve the raw value of the auth header to a user.
    ///
    /// The header is validated before the store is consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed, the key is unknown, or
    /// the store fails.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<User, AuthError> {
        let token = extract_bearer_token(header)?;

        let user = self
            .store
            .find_by_api_key_hash(&hash_api_key(token))
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or(AuthError::UnknownApiKey)?;

        debug!(user_id = %user.id, "Request authenticated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::API_KEY_LEN;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Default)]
    struct MemoryCredentials {
        users: Mutex<Vec<(User, String)>>,
        lookups: AtomicUsize,
    }

    impl CredentialStore for MemoryCredentials {
        async fn create_user(&self, input: NewUser) -> Result<User, AccountError> {
            let mut users = self.users.lock().expect("lock");
            if users
                .iter()
                .any(|(u, h)| u.handle == input.handle || *h == input.api_key_hash)
            {
                return Err(AccountError::DuplicateHandle(input.handle));
            }
            let user = User {
                id: Uuid::new_v4(),
                handle: input.handle,
                email: input.email,
                created_at: Utc::now(),
            };
            users.push((user.clone(), input.api_key_hash));
            Ok(user)
        }

        async fn find_by_api_key_hash(
            &self,
            api_key_hash: &str,
        ) -> Result<Option<User>, AccountError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let users = self.users.lock().expect("lock");
            Ok(users
                .iter()
                .find(|(_, h)| h == api_key_hash)
                .map(|(u, _)| u.clone()))
        }
    }

    fn service() -> (AccountService<MemoryCredentials>, Arc<MemoryCredentials>) {
        let store = Arc::new(MemoryCredentials::default());
        (AccountService::new(store.clone()), store)
    }

    fn register_input(handle: &str) -> RegisterInput {
        RegisterInput {
            handle: handle.to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_register_returns_key_once_and_stores_hash() {
        let (service, store) = service();

        let registered = service
            .register(register_input("alice"))
            .await
            .expect("register");

        assert_eq!(registered.user.handle, "alice");
        assert_eq!(registered.api_key.len(), API_KEY_LEN);

        let users = store.users.lock().expect("lock");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].1, hash_api_key(&registered.api_key));
        assert_ne!(users[0].1, registered.api_key);
    }

    #[tokio::test]
    async fn test_register_issues_distinct_keys() {
        let (service, _) = service();

        let a = service.register(register_input("a")).await.expect("a");
        let b = service.register(register_input("b")).await.expect("b");

        assert_ne!(a.api_key, b.api_key);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_and_long_handles() {
        let (service, _) = service();

        let blank = service.register(register_input("   ")).await;
        assert!(matches!(blank, Err(AccountError::InvalidHandle(_))));

        let long = service
            .register(register_input(&"x".repeat(MAX_HANDLE_LEN + 1)))
            .await;
        assert!(matches!(long, Err(AccountError::InvalidHandle(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_handle() {
        let (service, _) = service();
        service.register(register_input("alice")).await.expect("first");

        let again = service.register(register_input("alice")).await;
        assert!(matches!(again, Err(AccountError::DuplicateHandle(_))));
    }

    #[tokio::test]
    async fn test_authenticate_resolves_registered_key() {
        let (service, _) = service();
        let registered = service.register(register_input("alice")).await.expect("register");

        let header = format!("Bearer {}", registered.api_key);
        let user = service
            .authenticate(Some(&header))
            .await
            .expect("should authenticate");

        assert_eq!(user, registered.user);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_key_is_unauthorized() {
        let (service, _) = service();

        let result = service.authenticate(Some("Bearer NOPE")).await;
        assert_eq!(result, Err(AuthError::UnknownApiKey));
    }

    #[tokio::test]
    async fn test_malformed_header_skips_store_lookup() {
        let (service, store) = service();

        for header in [None, Some("undefined"), Some("Token abc"), Some("Bearer a b")] {
            assert!(service.authenticate(header).await.is_err());
        }

        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }
}
