use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricescout_core::{
    load_config, validate_config, CandidateSource, DiscoveryEngine, ExtractorClient, OfferStore,
    SourceBackend, SqliteOfferStore,
};

use pricescout_server::api::create_router;
use pricescout_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("PRICESCOUT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    // Create SQLite offer store
    let store: Arc<dyn OfferStore> = Arc::new(
        SqliteOfferStore::new(&config.database.path).context("Failed to create offer store")?,
    );
    info!("Offer store initialized");

    // Create candidate source if configured
    let source: Option<Arc<dyn CandidateSource>> = match &config.source {
        Some(source_config) => match source_config.backend {
            SourceBackend::Extractor => {
                if let Some(extractor_config) = &source_config.extractor {
                    info!("Initializing extractor client at {}", extractor_config.url);
                    match ExtractorClient::new(extractor_config.clone()) {
                        Ok(client) => Some(Arc::new(client)),
                        Err(e) => {
                            error!("Failed to initialize extractor client: {}", e);
                            None
                        }
                    }
                } else {
                    error!("Extractor backend selected but no extractor config provided");
                    None
                }
            }
        },
        None => {
            info!("No candidate source configured; search requests will be rejected");
            None
        }
    };

    // Create discovery engine
    let catalog = config.catalog.clone().unwrap_or_default();
    let engine = source.map(|s| {
        info!(
            "Initializing discovery engine ({} laptop / {} server retailers)",
            catalog.laptop.len(),
            catalog.server.len()
        );
        DiscoveryEngine::new(s, catalog, config.discovery.clone())
    });

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), engine, store));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
