use std::net::SocketAddr;
use std::sync::Arc;

use iconlib_db::{CredentialStore, IconStore, MemoryStore, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iconlib_api::config::{ServerConfig, StoreBackend};
use iconlib_api::router::build_app_router;
use iconlib_api::services::IconLibraryService;
use iconlib_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iconlib_api=debug,iconlib_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        library = %config.library,
        "Loaded server configuration"
    );

    // --- Storage ---
    let (icons, credentials) = connect_store(&config).await;

    if config.bootstrap_library {
        let created = icons
            .create_library()
            .await
            .expect("Failed to create icons document");
        tracing::info!(created, library = %config.library, "Icons document bootstrap checked");
    }

    if let Some((username, password)) = &config.seed_credential {
        credentials
            .upsert_credential(username, password)
            .await
            .expect("Failed to seed credential");
        tracing::info!(%username, "Seed credential stored");
    }

    // --- Icons directory ---
    tokio::fs::create_dir_all(&config.icons_dir)
        .await
        .expect("Failed to create icons directory");
    tracing::info!(dir = %config.icons_dir.display(), "Serving icons from directory");

    // --- App state ---
    let config = Arc::new(config);
    let state = AppState {
        library: IconLibraryService::new(icons, config.icons_dir.clone()),
        credentials,
        config: Arc::clone(&config),
    };

    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Construct the configured backend. Both traits are served by one instance.
async fn connect_store(config: &ServerConfig) -> (Arc<dyn IconStore>, Arc<dyn CredentialStore>) {
    match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = iconlib_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            iconlib_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            iconlib_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let store = Arc::new(PgStore::new(pool, config.library.clone()));
            let icons: Arc<dyn IconStore> = store.clone();
            (icons, store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            let store = Arc::new(MemoryStore::new());
            let icons: Arc<dyn IconStore> = store.clone();
            (icons, store)
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
