//! inflight gateway
//!
//! Serves a small demo application with the concurrency interceptor in front:
//! - `/`            : immediate reply
//! - `/work?ms=N`   : replies after N milliseconds (to create overlap)
//! - `/_info`       : concurrency report (HTML), `/_info.json` for JSON
//! - `/healthz`, `/metrics`

use std::path::Path;
use std::time::Duration;

use axum::{extract::Query, routing::get, Router};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use inflight_gateway::{app_state::AppState, config, router};

const DEFAULT_CONFIG_PATH: &str = "inflight.yaml";
const MAX_WORK_MS: u64 = 30_000;

#[derive(Debug, Deserialize)]
struct WorkQuery {
    #[serde(default)]
    ms: u64,
}

async fn hello() -> &'static str {
    "hello\n"
}

async fn work(Query(q): Query<WorkQuery>) -> String {
    let ms = q.ms.min(MAX_WORK_MS);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    format!("worked {ms}ms\n")
}

fn demo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/work", get(work))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("INFLIGHT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = if Path::new(&path).exists() {
        config::load_from_file(&path)?
    } else {
        tracing::info!(%path, "config file not found; using defaults");
        config::InflightConfig::default()
    };
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(cfg)?;
    let app = router::build_router(state, demo_routes());

    tracing::info!(%listen, "inflight-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
