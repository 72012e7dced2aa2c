//! Shared application state for the inflight gateway.
//!
//! Owns the one `ConcurrencyTracker` for the process. The interceptor and the
//! reporting routes reach it through this handle; nothing is global.

use std::sync::Arc;

use inflight_core::error::Result;
use inflight_core::ConcurrencyTracker;

use crate::config::InflightConfig;
use crate::context::request_id::RequestIdSource;
use crate::obs::metrics::InflightMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    tracker: Arc<ConcurrencyTracker>,
    metrics: Arc<InflightMetrics>,
}

struct AppStateInner {
    cfg: InflightConfig,
    request_ids: RequestIdSource,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report a bad request id source before serving.
    pub fn new(cfg: InflightConfig) -> Result<Self> {
        let tracker = Arc::new(ConcurrencyTracker::new(cfg.tracker.capacity));
        Self::with_tracker(cfg, tracker)
    }

    /// Build state around an existing tracker.
    pub fn with_tracker(cfg: InflightConfig, tracker: Arc<ConcurrencyTracker>) -> Result<Self> {
        let request_ids = RequestIdSource::from_config(&cfg.request_id)?;
        tracing::debug!(
            capacity = tracker.capacity(),
            source = %request_ids.describe(),
            "concurrency tracker ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, request_ids }),
            tracker,
            metrics: Arc::new(InflightMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &InflightConfig {
        &self.inner.cfg
    }

    pub fn request_ids(&self) -> &RequestIdSource {
        &self.inner.request_ids
    }

    pub fn tracker(&self) -> Arc<ConcurrencyTracker> {
        Arc::clone(&self.tracker)
    }

    pub fn metrics(&self) -> &InflightMetrics {
        &self.metrics
    }

    /// Tracker-derived gauges for `/metrics`.
    pub fn metrics_gauges(&self) -> Vec<(&'static str, u64)> {
        let snap = self.tracker.snapshot();
        vec![
            ("inflight_requests_active", snap.current.len() as u64),
            ("inflight_peak_concurrency", snap.peak() as u64),
            ("inflight_history_len", snap.history.len() as u64),
        ]
    }
}
