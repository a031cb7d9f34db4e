//! EduPress App
//!
//! Serves the headless EduPress client over HTTP.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edupress_app::{
    routes, AppState, AuthManager, Backend, Config, ConsoleEmailSender, InMemoryAccountStore,
    InMemorySnapshotStore, OfflineBackend, RestBackend, SnapshotStore, SqliteSnapshotStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edupress_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    // Local storage for the session snapshot
    let snapshots: Box<dyn SnapshotStore> = match &config.snapshot_db {
        Some(path) => {
            tracing::info!(path = %path, "Using SQLite snapshot store");
            Box::new(SqliteSnapshotStore::open(path)?)
        }
        None => Box::new(InMemorySnapshotStore::new()),
    };

    let auth = AuthManager::restore(
        InMemoryAccountStore::with_demo_accounts(),
        snapshots,
        ConsoleEmailSender::new(),
    )
    .with_demo_logins(config.demo_mode())
    .with_bcrypt_cost(config.bcrypt_cost);

    // Remote backend, or fixtures only
    let backend: Box<dyn Backend> = match &config.backend {
        Some(backend) => {
            let timeout = Duration::from_secs(config.backend_timeout_secs);
            tracing::info!(url = %backend.url, "Using remote backend");
            Box::new(RestBackend::new(backend, timeout)?)
        }
        None => {
            tracing::info!("No backend configured, running in demo mode");
            Box::new(OfflineBackend)
        }
    };

    // Create app state
    let state = Arc::new(AppState::new(auth, backend));

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("EduPress listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
