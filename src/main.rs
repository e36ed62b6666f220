//! popin-venues server entry point.
//!
//! Wires the store, file store and scheduler together and serves the REST
//! API until Ctrl-C or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use popin_venues::api;
use popin_venues::app_state::AppState;
use popin_venues::config::AppConfig;
use popin_venues::persistence::{InMemoryVenueStore, PostgresVenueStore, VenueStore};
use popin_venues::scheduler::spawn_pop_reset;
use popin_venues::service::VenueService;
use popin_venues::storage::DirectoryPhotoStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting popin-venues");

    // Build persistence layer
    let store: Arc<dyn VenueStore> = if config.persistence_enabled {
        let store = PostgresVenueStore::connect(&config)
            .await
            .context("failed to connect to the database")?;
        tracing::info!("connected to the database");
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled, using empty in-memory store");
        Arc::new(InMemoryVenueStore::new())
    };

    let photos = DirectoryPhotoStorage::new(&config.uploads_dir)
        .await
        .with_context(|| format!("failed to create {}", config.uploads_dir.display()))?;

    // Build service layer
    let venue_service = Arc::new(VenueService::new(
        store,
        Arc::new(photos),
        &config.public_base_url,
    ));

    if config.pop_reset_enabled {
        spawn_pop_reset(Arc::clone(&venue_service));
    }

    // Build router
    let app = api::build_app(
        AppState { venue_service },
        &config.uploads_dir,
        &config.allowed_origin,
    )
    .context("invalid ALLOWED_ORIGIN")?;

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
