//! Photo upload and download routes.

use axum::{
    Json, Router,
    body::Body,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use photopin_core::photo::{Photo, UploadInput};
use photopin_shared::AppError;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
};

/// Headroom for multipart framing on top of the file size limit.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Routes that require authentication.
pub fn protected_routes(max_file_size: u64) -> Router<AppState> {
    let limit = usize::try_from(max_file_size.saturating_add(MULTIPART_OVERHEAD))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/photo", post(upload_photo))
        .layer(DefaultBodyLimit::max(limit))
}

/// Routes open to anyone.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/photo/{cid}", get(download_photo))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// The file.
    #[schema(value_type = String, format = Binary)]
    data: Vec<u8>,
    /// Overrides the file's own name.
    filename: Option<String>,
}

/// A stored photo.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoResponse {
    /// Photo ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Content id used to download the bytes.
    pub cid: String,
    /// Size in bytes.
    pub size: i64,
    /// Uploader.
    pub owner_id: Uuid,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            name: photo.name,
            cid: photo.cid,
            size: photo.size,
            owner_id: photo.owner_id,
            created_at: photo.created_at,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(AppError::PayloadTooLarge(err.body_text()))
    } else {
        ApiError(AppError::BadRequest(format!(
            "Invalid multipart data: {}",
            err.body_text()
        )))
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/photo`
/// Upload a photo as `multipart/form-data`.
#[utoipa::path(
    post,
    path = "/photo",
    tag = "photos",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Photo stored", body = PhotoResponse),
        (status = 400, description = "Malformed form", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or unknown API key", body = crate::error::ErrorBody),
        (status = 413, description = "File too large", body = crate::error::ErrorBody),
        (status = 500, description = "Gateway or store failure", body = crate::error::ErrorBody)
    )
)]
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<PhotoResponse>)> {
    let mut multipart = multipart
        .map_err(|e| ApiError(AppError::BadRequest(format!("Invalid multipart body: {e}"))))?;

    let mut data: Option<(Option<String>, Bytes)> = None;
    let mut filename_override: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "data" => {
                let original = field.file_name().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                data = Some((original, bytes));
            }
            "filename" => {
                let text = field.text().await.map_err(|e| multipart_error(&e))?;
                if !text.trim().is_empty() {
                    filename_override = Some(text);
                }
            }
            _ => {
                warn!(field = %name, "Ignoring unexpected multipart field");
            }
        }
    }

    let Some((original, bytes)) = data else {
        return Err(ApiError(AppError::BadRequest(
            "multipart field 'data' is required".into(),
        )));
    };

    let filename = filename_override.or(original).unwrap_or_default();
    let photo = state
        .photos
        .upload(UploadInput {
            owner_id: auth.user_id(),
            filename,
            content: bytes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(photo.into())))
}

/// GET `/photo/{cid}`
/// Stream a photo's bytes.
#[utoipa::path(
    get,
    path = "/photo/{cid}",
    tag = "photos",
    params(("cid" = String, Path, description = "Content id returned by the upload")),
    responses(
        (status = 200, description = "Photo bytes", content_type = "application/octet-stream", body = String),
        (status = 400, description = "Stored content id is malformed", body = crate::error::ErrorBody),
        (status = 404, description = "No photo with this content id", body = crate::error::ErrorBody),
        (status = 500, description = "Gateway or store failure", body = crate::error::ErrorBody)
    )
)]
pub async fn download_photo(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> ApiResult<Response> {
    let download = state.photos.download(&cid).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Body::from_stream(download.content),
    )
        .into_response())
}
