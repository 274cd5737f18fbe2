//! `OpenAPI` documentation.
//!
//! [`ApiDoc`] collects every route and schema; [`swagger_ui`] serves the
//! document at `/api-docs/openapi.json` with Swagger UI at `/swagger-ui`.

use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;
use crate::error::ErrorBody;
use crate::routes::health::HealthResponse;
use crate::routes::photos::{PhotoResponse, UploadForm};
use crate::routes::users::RegisteredUserResponse;

/// Registers the bearer API key scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// `OpenAPI` document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "photopin API",
        description = "Register users, upload photos to the pin store and download them by content id."
    ),
    paths(
        crate::routes::health::index,
        crate::routes::health::health_check,
        crate::routes::users::register,
        crate::routes::photos::upload_photo,
        crate::routes::photos::download_photo,
    ),
    components(schemas(
        ErrorBody,
        HealthResponse,
        RegisteredUserResponse,
        PhotoResponse,
        UploadForm
    )),
    tags(
        (name = "health", description = "Greeting and health probes"),
        (name = "users", description = "User registration"),
        (name = "photos", description = "Photo upload and download")
    )
)]
pub struct ApiDoc;

/// Swagger UI plus the raw document.
pub fn swagger_ui() -> Router<AppState> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
