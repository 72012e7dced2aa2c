//! inflight core: the bounded top-K concurrency sampler and its error surface.
//!
//! This crate tracks which requests are executing right now and keeps the
//! highest concurrency observations seen over the tracker's lifetime. It
//! carries no transport or runtime dependencies so the gateway, tests, and any
//! other host can embed it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Recording runs on every request path, so it must never bring the host down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod guard;
pub mod sample;
pub mod tracker;

pub use error::{InflightError, Result};
pub use guard::{track, track_async, RequestGuard};
pub use sample::{ConcurrentSample, RequestId};
pub use tracker::{ConcurrencyTracker, TrackerSnapshot, DEFAULT_CAPACITY};
