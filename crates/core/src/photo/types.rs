//! Photo types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::content::ByteStream;

/// Photo metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Content id of the bytes in the gateway.
    pub cid: String,
    /// Size in bytes.
    pub size: i64,
    /// Owning user.
    pub owner_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a photo record.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    /// Display name.
    pub name: String,
    /// Content id returned by the gateway.
    pub cid: String,
    /// Size in bytes.
    pub size: i64,
    /// Owning user.
    pub owner_id: Uuid,
}

/// Input for uploading a photo.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// Authenticated uploader.
    pub owner_id: Uuid,
    /// Override name if one was sent, otherwise the file's original name.
    pub filename: String,
    /// File content.
    pub content: Bytes,
}

/// A photo ready to be streamed back.
pub struct PhotoDownload {
    /// Metadata of the photo.
    pub photo: Photo,
    /// Photo bytes.
    pub content: ByteStream,
}
