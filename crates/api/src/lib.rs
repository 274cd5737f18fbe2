//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Bearer API key middleware
//! - JSON error responses
//! - `OpenAPI` documentation

pub mod docs;
pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::http::HeaderName;
use axum::http::header::InvalidHeaderName;
use photopin_core::account::AccountService;
use photopin_core::content::PinStore;
use photopin_core::photo::PhotoService;
use photopin_db::{PhotoRepository, UserRepository};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration and API key authentication.
    pub accounts: Arc<AccountService<UserRepository>>,
    /// Photo upload and download.
    pub photos: Arc<PhotoService<PhotoRepository, PinStore>>,
    /// Header carrying `Bearer <api-key>`.
    pub auth_header: HeaderName,
    /// Largest accepted upload in bytes.
    pub max_file_size: u64,
}

impl AppState {
    /// Wires repositories and the pin store into the services.
    ///
    /// # Errors
    ///
    /// Returns an error if `auth_header` is not a valid header name.
    pub fn new(
        db: DatabaseConnection,
        gateway: PinStore,
        auth_header: &str,
    ) -> Result<Self, InvalidHeaderName> {
        let max_file_size = gateway.config().max_file_size;
        Ok(Self {
            accounts: Arc::new(AccountService::new(Arc::new(UserRepository::new(
                db.clone(),
            )))),
            photos: Arc::new(PhotoService::new(
                Arc::new(PhotoRepository::new(db)),
                Arc::new(gateway),
            )),
            auth_header: HeaderName::try_from(auth_header.to_ascii_lowercase())?,
            max_file_size,
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .merge(docs::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
