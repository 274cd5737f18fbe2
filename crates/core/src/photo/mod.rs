//! Photo upload and download workflows.
//!
//! Uploading pins the bytes in the content gateway first and only then
//! records the photo's metadata. Downloading resolves the metadata record
//! and streams the bytes straight from the gateway.

mod error;
mod service;
mod types;

pub use error::PhotoError;
pub use service::{MetadataStore, PhotoService};
pub use types::{NewPhoto, Photo, PhotoDownload, UploadInput};
