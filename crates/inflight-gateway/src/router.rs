//! Axum router wiring.
//!
//! Application routes and the concurrency report sit behind the interceptor.
//! `/healthz` and `/metrics` are mounted outside it: they need no request id
//! and are not counted.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, interceptor, ops};

pub fn build_router(state: AppState, app: Router<AppState>) -> Router {
    let info = state.cfg().info.clone();

    Router::new()
        .merge(app)
        .route(&info.path, get(ops::info))
        .route(&info.json_path(), get(ops::info_json))
        .layer(middleware::from_fn_with_state(state.clone(), interceptor::track_request))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
