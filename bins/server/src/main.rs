//! photopin API Server
//!
//! Main entry point for the photopin service.

use anyhow::Context;
use axum::{ServiceExt, extract::Request};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photopin_api::{AppState, create_router};
use photopin_core::content::{PinBackend, PinStore, PinStoreConfig};
use photopin_db::{connect, migrate};
use photopin_shared::{AppConfig, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photopin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!("Connected to database");

    if config.database.auto_migrate {
        migrate(&db).await?;
        info!("Migrations applied");
    }

    // Create pin store
    let gateway = PinStore::from_config(pin_store_config(&config.gateway))?;
    info!(
        backend = gateway.backend_name(),
        max_file_size = config.gateway.max_file_size,
        "Pin store configured"
    );

    // Create application state
    let state = AppState::new(db, gateway, &config.auth.header)
        .context("Invalid auth header name")?;

    // Create router; trailing slashes are stripped before routing
    let app = NormalizePathLayer::trim_trailing_slash().layer(create_router(state));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}

fn pin_store_config(gateway: &GatewayConfig) -> PinStoreConfig {
    let backend = match &gateway.s3 {
        Some(s3) => PinBackend::s3(
            &s3.endpoint,
            &s3.bucket,
            &s3.access_key_id,
            &s3.secret_access_key,
            &s3.region,
        ),
        None => PinBackend::local_fs(&gateway.root),
    };

    PinStoreConfig::new(backend, gateway.api_key.clone()).with_max_file_size(gateway.max_file_size)
}
