//! Operational HTTP endpoints.
//!
//! - `/healthz`       : liveness
//! - `/metrics`       : Prometheus text format
//! - `{info}`         : HTML concurrency report (default `/_info`)
//! - `{info}.json`    : the same report as JSON
//!
//! All of them only read tracker state.

pub mod info_page;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use inflight_core::TrackerSnapshot;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let gauges = state.metrics_gauges();
    let body = state.metrics().render(&gauges);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Runtime name from the configured env var, read per render.
fn runtime_name(state: &AppState) -> Option<String> {
    std::env::var(&state.cfg().info.runtime_env)
        .ok()
        .filter(|v| !v.is_empty())
}

pub async fn info(State(state): State<AppState>) -> Html<String> {
    let snap = state.tracker().snapshot();
    Html(info_page::render(&snap, runtime_name(&state).as_deref()))
}

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub runtime: Option<String>,
    pub in_flight: usize,
    pub peak: usize,
    #[serde(flatten)]
    pub snapshot: TrackerSnapshot,
}

pub async fn info_json(State(state): State<AppState>) -> Json<InfoReport> {
    let snapshot = state.tracker().snapshot();
    Json(InfoReport {
        runtime: runtime_name(&state),
        in_flight: snapshot.current.len(),
        peak: snapshot.peak(),
        snapshot,
    })
}
