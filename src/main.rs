//! Book Review API Server
//! Mission: Serve the book catalogue and let registered readers review it

use anyhow::{Context, Result};
use book_review_backend::{
    auth::{JwtHandler, UserStore},
    catalog::CatalogStore,
    config::ServerConfig,
    create_router, AppState,
};
use clap::Parser;
use dotenv::dotenv;
use std::{path::Path, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = ServerConfig::parse();

    info!("🚀 Book Review API Starting");

    if config.uses_dev_secret() {
        warn!("⚠️  JWT_SECRET not set, using development signing secret");
    }

    let catalog = Arc::new(CatalogStore::seeded());
    let user_store = Arc::new(UserStore::new());
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret.clone()));

    let state = AppState::new(catalog, user_store, jwt_handler);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Server stopped");
    Ok(())
}

/// Initialize tracing with an env-overridable filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_review_backend=debug,book_review=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate's own .env when launched from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
