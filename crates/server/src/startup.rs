use std::{future::Future, path::Path};

use axum::Router;
use configs::AppConfig;
use service::{auth::service::AuthConfig, storage::json_document_store::JsonDocumentStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the store (creating it on first boot) and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let store_path = Path::new(&cfg.storage.path);
    common::env::ensure_data_dir(store_path)
        .await
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let store = JsonDocumentStore::open(store_path).await?;

    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set; signing tokens with the development secret");
    }
    let state = ServerState::new(
        store,
        AuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), token_ttl_secs: cfg.auth.token_ttl_secs },
    );
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, letting in-flight requests finish.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let listener = TcpListener::bind(cfg.bind_addr())
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {}: {e}", cfg.bind_addr())))?;
    let addr = listener.local_addr()?;
    info!(%addr, store = %cfg.storage.path, "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
