use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat};
use service::{
    devices::{DeviceService, UuidIds},
    storage::{DeviceStore, DuplicatePolicy},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{metrics, routes::{self, AppState}};

/// Initialize logging via shared common utils
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the device store and service from configuration and wire the router.
pub fn build_app(cfg: &AppConfig) -> Router {
    let policy = if cfg.store.reject_duplicate_ids {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::Overwrite
    };
    let store = Arc::new(DeviceStore::with_policy(cfg.store.capacity, policy));
    let devices = DeviceService::new(store, Arc::new(UuidIds));
    metrics::set_stored(devices.stored());

    let timeout = Duration::from_secs(cfg.server.request_timeout_secs);
    routes::build_router(AppState::new(devices), build_cors(), timeout)
}

/// Public entry: build the app and run the HTTP server until Ctrl-C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg);

    let bind = cfg.server.bind_addr();
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    let addr = listener.local_addr()?;
    info!(%addr, capacity = cfg.store.capacity, "starting device api");
    serve(listener, app).await
}

/// Serve `app` on an already bound listener with graceful shutdown.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("device api stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
