use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use service::{DealStore, InMemoryDealStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::observability;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Store for a fresh process: seeded sample deals or empty.
pub fn build_store(seed: bool) -> Arc<dyn DealStore> {
    if seed {
        Arc::new(InMemoryDealStore::seeded())
    } else {
        Arc::new(InMemoryDealStore::new())
    }
}

/// Router with all layers, ready to serve.
pub fn build_app(store: Arc<dyn DealStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

/// Serve `app` on an already bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Install the tracing subscriber in the configured format.
pub fn init_logging_from(cfg: &AppConfig) -> anyhow::Result<()> {
    let format = cfg.logging.format.parse::<LogFormat>().map_err(anyhow::Error::msg)?;
    init_logging(format);
    Ok(())
}

/// Run the HTTP server with an already loaded config.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let store = build_store(cfg.store.seed);
    let stored = store.count().await;
    observability::set_stored(stored);
    info!(seeded = cfg.store.seed, deals = stored, "deal store ready");

    let app = build_app(store);

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "starting deals api");
    serve(listener, app).await?;
    info!("deals api stopped");
    Ok(())
}
