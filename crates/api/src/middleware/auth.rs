//! API key authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use photopin_core::account::User;
use photopin_shared::AppError;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Authentication middleware that resolves bearer API keys to users.
///
/// This middleware:
/// 1. Reads the configured auth header
/// 2. Validates its `Bearer <key>` shape before touching the database
/// 3. Stores the resolved user in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Non-UTF-8 values are treated like a missing header.
    let header = request
        .headers()
        .get(&state.auth_header)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match state.accounts.authenticate(header.as_deref()).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let owner = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.0.id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError(AppError::Unauthenticated("Authentication required".into())))
    }
}
