//! User repository for database operations.

use photopin_core::account::{AccountError, CredentialStore, NewUser, User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use tracing::error;
use uuid::Uuid;

use crate::entities::users;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, input: NewUser) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            handle: Set(input.handle),
            api_key_hash: Set(input.api_key_hash),
            email: Set(input.email),
            created_at: Set(chrono::Utc::now().into()),
        };

        user.insert(&self.db).await
    }
}

impl CredentialStore for UserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, AccountError> {
        let handle = input.handle.clone();
        match self.insert(input).await {
            Ok(model) => Ok(to_user(model)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AccountError::DuplicateHandle(handle))
                }
                _ => {
                    error!(error = %e, "Failed to insert user");
                    Err(AccountError::repository(e.to_string()))
                }
            },
        }
    }

    async fn find_by_api_key_hash(
        &self,
        api_key_hash: &str,
    ) -> Result<Option<User>, AccountError> {
        users::Entity::find()
            .filter(users::Column::ApiKeyHash.eq(api_key_hash))
            .one(&self.db)
            .await
            .map(|found| found.map(to_user))
            .map_err(|e| AccountError::repository(e.to_string()))
    }
}

fn to_user(model: users::Model) -> User {
    User {
        id: model.id,
        handle: model.handle,
        email: model.email,
        created_at: model.created_at.into(),
    }
}
