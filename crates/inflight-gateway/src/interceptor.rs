//! Request interceptor.
//!
//! Runs around every instrumented route: resolves the request id, registers
//! it with the tracker, runs the inner handler, and unregisters it. The
//! unregister lives in a `RequestGuard`, so it also fires when the handler
//! panics or the connection drops and the future is cancelled.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Metric label for a request method. Extension methods collapse into
/// "other" so clients cannot mint new series.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        Method::PATCH => "PATCH",
        Method::CONNECT => "CONNECT",
        Method::TRACE => "TRACE",
        _ => "other",
    }
}

pub async fn track_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let id = match state.request_ids().resolve(req.headers()) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, path = %req.uri().path(), "request id unavailable; check request_id config");
            state.metrics().missing_request_id.inc(&[]);
            return ApiError(e).into_response();
        }
    };

    let method = method_label(req.method());
    let span = tracing::debug_span!("request", request_id = %id, method = %req.method(), path = %req.uri().path());
    state.metrics().requests.inc(&[("method", method)]);

    let started = Instant::now();
    let guard = state.tracker().enter(id);
    let res = next.run(req).instrument(span).await;
    drop(guard);

    state
        .metrics()
        .request_duration
        .observe(&[("method", method)], started.elapsed());
    res
}
