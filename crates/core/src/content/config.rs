//! Pin store configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend that physically holds pinned objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PinBackend {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory, lost on exit
    Memory,
}

impl PinBackend {
    /// Create S3-compatible backend.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem backend.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Backend name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Pin store configuration.
#[derive(Debug, Clone)]
pub struct PinStoreConfig {
    /// Where objects live.
    pub backend: PinBackend,
    /// API key of this deployment, written into every pin record.
    pub requesting_api_key: String,
    /// Maximum object size in bytes.
    pub max_file_size: u64,
}

impl PinStoreConfig {
    /// Default max object size: 32 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 32 * 1024 * 1024;

    /// Create a new pin store config with default limits.
    #[must_use]
    pub fn new(backend: PinBackend, requesting_api_key: impl Into<String>) -> Self {
        Self {
            backend,
            requesting_api_key: requesting_api_key.into(),
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set maximum object size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        let s3 = PinBackend::s3(
            "https://account.r2.cloudflarestorage.com",
            "pins",
            "access_key",
            "secret_key",
            "auto",
        );
        assert_eq!(s3.name(), "s3");
        assert_eq!(PinBackend::local_fs("./pins").name(), "local");
        assert_eq!(PinBackend::Memory.name(), "memory");
    }

    #[test]
    fn test_config_defaults() {
        let config = PinStoreConfig::new(PinBackend::Memory, "upstream-key");
        assert_eq!(config.max_file_size, PinStoreConfig::DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.requesting_api_key, "upstream-key");

        let config = config.with_max_file_size(10);
        assert_eq!(config.max_file_size, 10);
    }
}
