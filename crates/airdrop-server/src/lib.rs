//! Airdrop Discovery Server
//!
//! HTTP boundary around the classifier: ingestion of tweets, filtered
//! listing and keyword search of stored airdrops.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use airdrop_classifier::{DiscoveryService, WebhookNotifier};
use airdrop_store::{SqliteStore, StoreError};
use config::ServerConfig;
use handlers::{create_health_router, create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Record store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open the store and wire the discovery service described by `config`
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let store = SqliteStore::with_table(&config.database.path, &config.database.table_name)?;
    let service = DiscoveryService::new(store, config.keywords.to_keyword_config());

    let service = match WebhookNotifier::from_config(&config.integration) {
        Some(notifier) => {
            info!("Webhook notifications enabled: {}", notifier.url());
            service.with_notifier(notifier)
        }
        None => service,
    };

    Ok(AppState {
        service: Arc::new(service),
    })
}

/// Start the HTTP server
///
/// Opens the store, wires the discovery service and serves until the
/// process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Airdrop Discovery server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Database: {} (table {})",
        config.database.path, config.database.table_name
    );
    info!(
        "Keywords: positive={:?} negative={:?}",
        config.keywords.positive, config.keywords.negative
    );

    let state = build_state(&config)?;

    let app = if config.enabled {
        create_router(state)
    } else {
        warn!("Airdrop discovery disabled; serving /health only");
        create_health_router(state)
    };

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
