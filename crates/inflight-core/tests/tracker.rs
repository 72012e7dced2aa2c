#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use inflight_core::{ConcurrencyTracker, RequestId, DEFAULT_CAPACITY};

fn rid(s: &str) -> RequestId {
    RequestId::new(s).expect("non-empty id")
}

fn counts(t: &ConcurrencyTracker) -> Vec<usize> {
    let mut v: Vec<usize> = t.snapshot().history.iter().map(|s| s.count).collect();
    v.sort_unstable();
    v
}

#[test]
fn single_request_records_no_sample() {
    let t = ConcurrencyTracker::default();
    t.record_start(&rid("a"));

    let snap = t.snapshot();
    assert_eq!(snap.current, vec![rid("a")]);
    assert!(snap.history.is_empty());

    assert!(t.record_end(&rid("a")));
    assert_eq!(t.in_flight(), 0);
    assert!(t.snapshot().history.is_empty());
}

#[test]
fn overlapping_pair_records_one_sample() {
    let t = ConcurrencyTracker::default();
    t.record_start(&rid("a"));
    t.record_start(&rid("b"));
    assert_eq!(counts(&t), vec![2]);

    t.record_end(&rid("a"));
    t.record_end(&rid("b"));

    let snap = t.snapshot();
    assert!(snap.current.is_empty());
    assert_eq!(snap.history.len(), 1);
    assert_eq!(snap.peak(), 2);
}

#[test]
fn overflow_keeps_highest_counts() {
    let t = ConcurrencyTracker::default();
    // 26 starts: the first sees no overlap, the rest offer counts 2..=26.
    for i in 0..26 {
        t.record_start(&rid(&format!("r{i}")));
    }

    assert_eq!(counts(&t), (7..=26).collect::<Vec<_>>());
    assert_eq!(t.snapshot().history.len(), DEFAULT_CAPACITY);
}

#[test]
fn low_bursts_are_not_retained_when_full() {
    let t = ConcurrencyTracker::default();
    for i in 0..22 {
        t.record_start(&rid(&format!("r{i}")));
    }
    for i in 0..22 {
        t.record_end(&rid(&format!("r{i}")));
    }
    let before = counts(&t);
    assert_eq!(before, (3..=22).collect::<Vec<_>>());

    for (x, y) in [("a", "b"), ("c", "d")] {
        t.record_start(&rid(x));
        t.record_start(&rid(y));
        t.record_end(&rid(x));
        t.record_end(&rid(y));
    }

    assert_eq!(counts(&t), before);
    assert_eq!(t.in_flight(), 0);
}

#[test]
fn end_is_idempotent() {
    let t = ConcurrencyTracker::default();
    assert!(!t.record_end(&rid("ghost")));

    t.record_start(&rid("a"));
    t.record_start(&rid("b"));
    assert!(t.record_end(&rid("a")));
    assert!(!t.record_end(&rid("a")));
    assert!(!t.record_end(&rid("a")));

    assert_eq!(t.in_flight(), 1);
    assert_eq!(t.snapshot().current, vec![rid("b")]);
}

#[test]
fn duplicate_start_does_not_inflate_counts() {
    let t = ConcurrencyTracker::default();
    assert!(t.record_start(&rid("a")));
    assert!(!t.record_start(&rid("a")));

    assert_eq!(t.in_flight(), 1);
    assert!(t.snapshot().history.is_empty());
}

#[test]
fn custom_capacity_is_respected() {
    let t = ConcurrencyTracker::new(3);
    for i in 0..10 {
        t.record_start(&rid(&format!("r{i}")));
    }
    assert_eq!(counts(&t), vec![8, 9, 10]);

    // zero is clamped so the tracker still keeps the single peak
    let z = ConcurrencyTracker::new(0);
    assert_eq!(z.capacity(), 1);
    for i in 0..4 {
        z.record_start(&rid(&format!("r{i}")));
    }
    assert_eq!(counts(&z), vec![4]);
}

#[test]
fn huge_capacity_does_not_preallocate_or_overflow() {
    let t = ConcurrencyTracker::new(usize::MAX);
    assert_eq!(t.capacity(), usize::MAX);
    for i in 0..30 {
        t.record_start(&rid(&format!("r{i}")));
    }
    // nothing is evicted below capacity
    assert_eq!(counts(&t), (2..=30).collect::<Vec<_>>());
}

#[test]
fn history_by_count_sorts_descending() {
    let t = ConcurrencyTracker::default();
    for i in 0..5 {
        t.record_start(&rid(&format!("r{i}")));
    }
    let sorted: Vec<usize> = t
        .snapshot()
        .history_by_count()
        .iter()
        .map(|s| s.count)
        .collect();
    assert_eq!(sorted, vec![5, 4, 3, 2]);
}

#[test]
fn threads_leave_no_stale_entries() {
    let t = Arc::new(ConcurrencyTracker::new(5));
    let workers = 8;

    let handles: Vec<_> = (0..workers)
        .map(|w| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for i in 0..500 {
                    let id = rid(&format!("w{w}-{i}"));
                    t.record_start(&id);
                    t.record_end(&id);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = t.snapshot();
    assert!(snap.current.is_empty());
    assert!(snap.history.len() <= 5);
    assert!(snap.history.iter().all(|s| (2..=workers).contains(&s.count)));
}

#[test]
fn snapshot_serializes_timestamps_as_rfc3339() {
    let t = ConcurrencyTracker::default();
    t.record_start(&rid("a"));
    t.record_start(&rid("b"));

    let v = serde_json::to_value(t.snapshot()).unwrap();
    assert_eq!(v["capacity"], 20);
    assert_eq!(v["current"], serde_json::json!(["a", "b"]));
    assert_eq!(v["history"][0]["count"], 2);
    assert!(v["history"][0]["when"].as_str().unwrap().contains('T'));
}

#[test]
fn empty_request_id_is_rejected() {
    assert!(RequestId::new("").is_err());
}
