//! Concurrency tracker: in-flight request set plus a bounded top-K history.
//!
//! Both structures sit behind one mutex because the decision to record a
//! sample depends on the size of the in-flight set at that instant.
//! Construct once at startup, then share via `Arc`.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::sample::{ConcurrentSample, RequestId};

/// Number of samples kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Default)]
struct TrackerInner {
    current: HashSet<RequestId>,
    // Min-heap: the root is the lowest retained sample, i.e. the next victim.
    history: BinaryHeap<Reverse<ConcurrentSample>>,
}

pub struct ConcurrencyTracker {
    capacity: usize,
    inner: Mutex<TrackerInner>,
}

impl Default for ConcurrencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ConcurrencyTracker {
    /// `capacity` is K, the number of peaks retained (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inner: Mutex::new(TrackerInner {
                current: HashSet::new(),
                history: BinaryHeap::with_capacity(capacity.min(DEFAULT_CAPACITY) + 1),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Nothing inside the critical sections can panic halfway through a
    // mutation, so a poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `id` as executing and sample concurrency.
    ///
    /// Starting an id that is already in flight is a caller bug: the set
    /// stays unchanged and no sample is recorded. Returns whether this call
    /// registered the id.
    pub fn record_start(&self, id: &RequestId) -> bool {
        let (inserted, count, evicted) = {
            let mut g = self.lock();
            let inserted = g.current.insert(id.clone());
            let count = g.current.len();
            let mut evicted = None;
            if inserted && count > 1 {
                g.history.push(Reverse(ConcurrentSample::now(count)));
                if g.history.len() > self.capacity {
                    evicted = g.history.pop().map(|Reverse(s)| s);
                }
            }
            (inserted, count, evicted)
        };

        if !inserted {
            tracing::warn!(request_id = %id, "request id already in flight; start ignored");
            return false;
        }
        if count > 1 {
            tracing::debug!(request_id = %id, count, "concurrent requests observed");
        }
        if let Some(s) = evicted {
            tracing::trace!(count = s.count, "evicted lowest concurrency sample");
        }
        true
    }

    /// Unregister `id`. Unknown or already removed ids are a no-op.
    /// Returns whether the id was in flight.
    pub fn record_end(&self, id: &RequestId) -> bool {
        let removed = self.lock().current.remove(id);
        if !removed {
            tracing::trace!(request_id = %id, "end for request not in flight");
        }
        removed
    }

    /// Number of requests in flight right now.
    pub fn in_flight(&self) -> usize {
        self.lock().current.len()
    }

    /// Copy the current state out under a brief lock.
    pub fn snapshot(&self) -> TrackerSnapshot {
        let g = self.lock();
        let mut current: Vec<RequestId> = g.current.iter().cloned().collect();
        let history: Vec<ConcurrentSample> = g.history.iter().map(|Reverse(s)| *s).collect();
        drop(g);

        current.sort();
        TrackerSnapshot {
            capacity: self.capacity,
            current,
            history,
        }
    }
}

/// Owned, point-in-time view of a tracker.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    pub capacity: usize,
    /// In-flight ids, sorted.
    pub current: Vec<RequestId>,
    /// Retained samples in no particular order.
    pub history: Vec<ConcurrentSample>,
}

impl TrackerSnapshot {
    /// History sorted for display: highest count first, newest first on ties.
    pub fn history_by_count(&self) -> Vec<ConcurrentSample> {
        let mut v = self.history.clone();
        v.sort_by(|a, b| b.cmp(a));
        v
    }

    /// Highest concurrency ever retained (0 when no overlap was seen).
    pub fn peak(&self) -> usize {
        self.history.iter().map(|s| s.count).max().unwrap_or(0)
    }
}
