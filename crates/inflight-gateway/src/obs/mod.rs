//! Lightweight in-process metrics.
//!
//! Counters and histograms are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format. Tracker-derived gauges are
//! computed from a snapshot at render time.

pub mod metrics;
