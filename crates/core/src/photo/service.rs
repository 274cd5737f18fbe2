//! Photo service implementation.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::error::PhotoError;
use super::types::{NewPhoto, Photo, PhotoDownload, UploadInput};
use crate::content::{ContentGateway, ContentId};

/// Number of lock stripes guarding per-cid record and unpin steps.
const CID_LOCK_STRIPES: usize = 64;

/// Repository trait for photo metadata persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait MetadataStore: Send + Sync {
    /// Create a new photo record.
    fn create(&self, input: NewPhoto) -> impl Future<Output = Result<Photo, PhotoError>> + Send;

    /// Find the earliest photo recorded under a content id.
    fn find_by_cid(
        &self,
        cid: &str,
    ) -> impl Future<Output = Result<Option<Photo>, PhotoError>> + Send;
}

/// Photo service orchestrating the gateway and the metadata store.
pub struct PhotoService<R: MetadataStore, G: ContentGateway> {
    repo: Arc<R>,
    gateway: Arc<G>,
    cid_locks: Vec<Mutex<()>>,
}

impl<R: MetadataStore, G: ContentGateway> PhotoService<R, G> {
    /// Create a new photo service.
    #[must_use]
    pub fn new(repo: Arc<R>, gateway: Arc<G>) -> Self {
        Self {
            repo,
            gateway,
            cid_locks: (0..CID_LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Pin the content, then record the photo.
    ///
    /// Recording and compensation for one cid are serialised. Before a
    /// record is written the bytes are confirmed present (and pinned again
    /// if a failed concurrent upload removed them). If the record cannot be
    /// written, bytes this upload stored are unpinned unless another photo
    /// already references them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The filename is blank
    /// - The gateway rejects or fails to store the content
    /// - The metadata store fails
    pub async fn upload(&self, input: UploadInput) -> Result<Photo, PhotoError> {
        let name = input.filename.trim().to_string();
        if name.is_empty() {
            return Err(PhotoError::MissingName);
        }

        let mut receipt = self.gateway.put(&name, input.content.clone()).await?;

        let _guard = self.cid_lock(&receipt.cid).lock().await;

        if !self.gateway.contains(&receipt.cid).await? {
            debug!(cid = %receipt.cid, "Content unpinned by a concurrent upload, pinning again");
            receipt = self.gateway.put(&name, input.content).await?;
        }

        let new_photo = NewPhoto {
            name,
            cid: receipt.cid.to_string(),
            size: i64::try_from(receipt.size).unwrap_or(i64::MAX),
            owner_id: input.owner_id,
        };

        match self.repo.create(new_photo).await {
            Ok(photo) => {
                info!(
                    photo_id = %photo.id,
                    cid = %photo.cid,
                    owner_id = %photo.owner_id,
                    size = photo.size,
                    "Photo uploaded"
                );
                Ok(photo)
            }
            Err(e) => {
                error!(error = %e, cid = %receipt.cid, "Failed to record photo");
                if receipt.newly_stored {
                    self.unpin_unreferenced(&receipt.cid).await;
                }
                Err(e)
            }
        }
    }

    /// Resolve a content id to its photo and open the byte stream.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No photo has this content id
    /// - The stored content id is malformed
    /// - The gateway cannot produce the bytes
    pub async fn download(&self, cid: &str) -> Result<PhotoDownload, PhotoError> {
        let photo = self
            .repo
            .find_by_cid(cid)
            .await?
            .ok_or_else(|| PhotoError::not_found(cid))?;

        let content_id = ContentId::parse(&photo.cid)?;
        let content = self.gateway.get(&content_id).await?;

        Ok(PhotoDownload { photo, content })
    }

    /// Must be called with the cid lock held.
    async fn unpin_unreferenced(&self, cid: &ContentId) {
        match self.repo.find_by_cid(cid.as_str()).await {
            Ok(Some(photo)) => {
                debug!(cid = %cid, photo_id = %photo.id, "Content still referenced, keeping pin");
            }
            Ok(None) => {
                if let Err(unpin_err) = self.gateway.unpin(cid).await {
                    warn!(error = %unpin_err, cid = %cid, "Orphaned pin left behind");
                }
            }
            Err(lookup_err) => {
                warn!(error = %lookup_err, cid = %cid, "Could not check references, keeping pin");
            }
        }
    }

    fn cid_lock(&self, cid: &ContentId) -> &Mutex<()> {
        let stripe = u8::from_str_radix(&cid.as_str()[..2], 16).map_or(0, usize::from);
        &self.cid_locks[stripe % CID_LOCK_STRIPES]
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
