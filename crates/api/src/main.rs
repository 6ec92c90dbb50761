use std::net::SocketAddr;
use std::sync::Arc;

use ceo_db::source::{OrderSource, PgOrderSource};
use ceo_db::store::OrderStore;
use ceo_sync::{ForceSyncClient, SyncDispatcher, SyncTarget};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ceo_api::config::ServerConfig;
use ceo_api::router::build_app_router;
use ceo_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ceo_api=debug,ceo_db=debug,ceo_sync=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        client_id = %config.dashboard.client_id,
        timezone = %config.dashboard.timezone,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = ceo_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ceo_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    let source: Arc<dyn OrderSource> = Arc::new(PgOrderSource::new(pool));
    let orders = Arc::new(OrderStore::new(source, config.dashboard.cache_ttl()));

    // --- Force sync ---
    let client = ForceSyncClient::new(config.force_sync.clone())
        .expect("Failed to build force-sync HTTP client");
    let target: Arc<dyn SyncTarget> = Arc::new(client);
    let sync = Arc::new(SyncDispatcher::new(target, config.force_sync.max_in_flight));
    tracing::info!(
        url = %config.force_sync.url,
        max_in_flight = sync.max_in_flight(),
        "Force-sync client ready"
    );

    // --- App state ---
    let state = AppState {
        orders,
        sync,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

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

/// Wait for SIGINT or SIGTERM.
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
