//! inflight gateway library entry.
//!
//! Wires the concurrency tracker into an axum server: config loading, the
//! request interceptor, metrics, and the read-only report routes. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod error;
pub mod interceptor;
pub mod obs;
pub mod ops;
pub mod router;
