//! Index and health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Greeting returned by the index route.
pub const WELCOME: &str = "Welcome to photopin";

/// Health check response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Index handler.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Greeting", body = String))
)]
pub async fn index() -> Json<&'static str> {
    Json(WELCOME)
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Creates index and health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
