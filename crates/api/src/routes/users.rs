//! User registration routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
};
use chrono::{DateTime, Utc};
use photopin_core::account::{RegisterInput, RegisteredUser};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{AppState, error::ApiResult};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/user/{handle}", post(register))
}

/// Optional registration fields.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegisterQuery {
    /// Contact email.
    pub email: Option<String>,
}

/// A freshly registered user. `api_key` is shown exactly once.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUserResponse {
    /// User ID.
    pub id: Uuid,
    /// Unique handle.
    pub handle: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Plaintext API key for `Authorization: Bearer <api_key>`.
    pub api_key: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<RegisteredUser> for RegisteredUserResponse {
    fn from(registered: RegisteredUser) -> Self {
        Self {
            id: registered.user.id,
            handle: registered.user.handle,
            email: registered.user.email,
            api_key: registered.api_key,
            created_at: registered.user.created_at,
        }
    }
}

/// POST `/user/{handle}`
/// Register a user and mint its API key.
#[utoipa::path(
    post,
    path = "/user/{handle}",
    tag = "users",
    params(
        ("handle" = String, Path, description = "Unique handle, at most 64 characters"),
        RegisterQuery
    ),
    responses(
        (status = 201, description = "User registered", body = RegisteredUserResponse),
        (status = 400, description = "Invalid or duplicate handle", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<RegisterQuery>,
) -> ApiResult<(StatusCode, Json<RegisteredUserResponse>)> {
    let registered = state
        .accounts
        .register(RegisterInput {
            handle,
            email: query.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(registered.into())))
}
