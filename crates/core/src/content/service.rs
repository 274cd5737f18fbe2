//! Pin store implementation using Apache OpenDAL.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use opendal::{ErrorKind, Operator, services};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::cid::ContentId;
use super::config::{PinBackend, PinStoreConfig};
use super::error::GatewayError;
use super::gateway::{ByteStream, ContentGateway, PinReceipt};

/// Sidecar written next to every pinned object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRecord {
    /// Content id of the object.
    pub cid: String,
    /// Name the object was first pinned under.
    pub name: String,
    /// Object size in bytes.
    pub size: u64,
    /// API key of the deployment that requested the pin.
    pub requesting_api_key: String,
    /// When the object was first pinned.
    pub created_at: DateTime<Utc>,
}

/// Content-addressed pin store.
#[derive(Debug, Clone)]
pub struct PinStore {
    operator: Operator,
    config: PinStoreConfig,
}

impl PinStore {
    /// Create a new pin store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    pub fn from_config(config: PinStoreConfig) -> Result<Self, GatewayError> {
        let operator = Self::create_operator(&config.backend)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from backend config.
    fn create_operator(backend: &PinBackend) -> Result<Operator, GatewayError> {
        let operator = match backend {
            PinBackend::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| GatewayError::configuration(e.to_string()))?
                    .finish()
            }
            PinBackend::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| GatewayError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| GatewayError::configuration(e.to_string()))?
                    .finish()
            }
            PinBackend::Memory => Operator::new(services::Memory::default())
                .map_err(|e| GatewayError::configuration(e.to_string()))?
                .finish(),
        };

        Ok(operator)
    }

    /// Read the pin record of an object, if it is pinned.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or decoded.
    pub async fn pin_record(&self, cid: &ContentId) -> Result<Option<PinRecord>, GatewayError> {
        match self.operator.read(&pin_key(cid)).await {
            Ok(buf) => Ok(Some(serde_json::from_slice(&buf.to_vec())?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the backend name.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.config.backend.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &PinStoreConfig {
        &self.config
    }
}

impl ContentGateway for PinStore {
    async fn put(&self, name: &str, content: Bytes) -> Result<PinReceipt, GatewayError> {
        let max = self.config.max_file_size;
        let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
        if size > max {
            return Err(GatewayError::file_too_large(size, max));
        }

        let cid = ContentId::from_digest(&Sha256::digest(&content));
        if self.contains(&cid).await? {
            debug!(cid = %cid, "Object already pinned");
            return Ok(PinReceipt {
                cid,
                size,
                newly_stored: false,
            });
        }

        self.operator.write(&blob_key(&cid), content).await?;

        let record = PinRecord {
            cid: cid.to_string(),
            name: name.to_string(),
            size,
            requesting_api_key: self.config.requesting_api_key.clone(),
            created_at: Utc::now(),
        };
        self.operator
            .write(&pin_key(&cid), serde_json::to_vec(&record)?)
            .await?;

        debug!(cid = %cid, size, backend = self.backend_name(), "Object pinned");

        Ok(PinReceipt {
            cid,
            size,
            newly_stored: true,
        })
    }

    async fn contains(&self, cid: &ContentId) -> Result<bool, GatewayError> {
        match self.operator.stat(&blob_key(cid)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, cid: &ContentId) -> Result<ByteStream, GatewayError> {
        let key = blob_key(cid);
        // Surface a missing object here rather than mid-stream.
        self.operator.stat(&key).await?;

        let stream = self
            .operator
            .reader(&key)
            .await?
            .into_bytes_stream(..)
            .await?;

        Ok(stream.boxed())
    }

    async fn unpin(&self, cid: &ContentId) -> Result<(), GatewayError> {
        self.operator.delete(&blob_key(cid)).await?;
        if let Err(e) = self.operator.delete(&pin_key(cid)).await {
            warn!(cid = %cid, error = %e, "Failed to delete pin record");
        }
        Ok(())
    }
}

fn blob_key(cid: &ContentId) -> String {
    format!("blobs/{cid}")
}

fn pin_key(cid: &ContentId) -> String {
    format!("pins/{cid}.json")
}
