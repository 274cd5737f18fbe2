//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Content gateway configuration.
    pub gateway: GatewayConfig,
    /// Bearer authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`postgres://...` or `sqlite://...`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Run pending migrations when the server starts.
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_auto_migrate() -> bool {
    true
}

/// Content gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// This deployment's own API key, recorded on every pin it requests.
    pub api_key: String,
    /// Root directory for the filesystem pin store.
    #[serde(default = "default_gateway_root")]
    pub root: String,
    /// Largest accepted upload in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// S3-compatible backend. Takes precedence over `root` when present.
    #[serde(default)]
    pub s3: Option<S3Config>,
}

fn default_gateway_root() -> String {
    "./data/pins".to_string()
}

fn default_max_file_size() -> u64 {
    32 * 1024 * 1024 // 32 MiB
}

/// S3-compatible object storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// S3 endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "auto".to_string()
}

/// Bearer authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Name of the request header carrying `Bearer <api-key>`.
    #[serde(default = "default_auth_header")]
    pub header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: default_auth_header(),
        }
    }
}

fn default_auth_header() -> String {
    "authorization".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `PHOTOPIN__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PHOTOPIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
