//! Scoped request registration.
//!
//! A `RequestGuard` pairs `record_start` with `record_end`: the end fires in
//! `Drop`, so it runs on normal return, on error, on panic unwind, and when an
//! async handler is cancelled by dropping its future.

use std::future::Future;
use std::sync::Arc;

use crate::sample::RequestId;
use crate::tracker::ConcurrencyTracker;

#[must_use = "the request is unregistered as soon as the guard is dropped"]
pub struct RequestGuard {
    tracker: Arc<ConcurrencyTracker>,
    id: RequestId,
    // false when the id was already in flight under another guard
    registered: bool,
}

impl RequestGuard {
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// Whether this guard's start registered the id (and so owns its end).
    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        if self.registered {
            self.tracker.record_end(&self.id);
        }
    }
}

impl ConcurrencyTracker {
    /// Record the start of `id` and return the guard that will end it.
    ///
    /// If `id` is already in flight the guard is inert: dropping it leaves
    /// the earlier request registered.
    pub fn enter(self: &Arc<Self>, id: RequestId) -> RequestGuard {
        let registered = self.record_start(&id);
        RequestGuard {
            tracker: Arc::clone(self),
            id,
            registered,
        }
    }
}

/// Run `f` as request `id`.
pub fn track<T>(tracker: &Arc<ConcurrencyTracker>, id: RequestId, f: impl FnOnce() -> T) -> T {
    let _guard = tracker.enter(id);
    f()
}

/// Wrap `fut` as request `id`.
///
/// The start is recorded immediately, not on first poll. The end is recorded
/// when the returned future completes or is dropped.
pub fn track_async<F>(
    tracker: &Arc<ConcurrencyTracker>,
    id: RequestId,
    fut: F,
) -> impl Future<Output = F::Output>
where
    F: Future,
{
    let guard = tracker.enter(id);
    async move {
        let _guard = guard;
        fut.await
    }
}
