#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use inflight_core::{track, track_async, ConcurrencyTracker, RequestId};

fn rid(s: &str) -> RequestId {
    RequestId::new(s).expect("non-empty id")
}

#[test]
fn guard_releases_on_drop() {
    let t = Arc::new(ConcurrencyTracker::default());
    {
        let g = t.enter(rid("x"));
        assert_eq!(g.id().as_str(), "x");
        assert_eq!(t.in_flight(), 1);
    }
    assert_eq!(t.in_flight(), 0);
}

#[test]
fn duplicate_guard_leaves_original_registered() {
    let t = Arc::new(ConcurrencyTracker::default());
    let first = t.enter(rid("dup"));
    assert!(first.is_registered());
    {
        let second = t.enter(rid("dup"));
        assert!(!second.is_registered());
        assert_eq!(t.in_flight(), 1);
    }
    assert_eq!(t.in_flight(), 1);
    assert_eq!(t.snapshot().current, vec![rid("dup")]);

    drop(first);
    assert_eq!(t.in_flight(), 0);
}

#[test]
fn track_returns_handler_output() {
    let t = Arc::new(ConcurrencyTracker::default());
    let out = track(&t, rid("x"), || {
        assert_eq!(t.in_flight(), 1);
        42
    });
    assert_eq!(out, 42);
    assert_eq!(t.in_flight(), 0);
}

#[test]
fn track_releases_when_handler_fails() {
    let t = Arc::new(ConcurrencyTracker::default());
    let out: Result<(), String> = track(&t, rid("x"), || Err("boom".into()));
    assert_eq!(out.unwrap_err(), "boom");
    assert_eq!(t.in_flight(), 0);
}

#[test]
fn track_releases_when_handler_panics() {
    let t = Arc::new(ConcurrencyTracker::default());
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        let _: () = track(&t, rid("x"), || panic!("handler blew up"));
    }));
    assert!(res.is_err());
    assert_eq!(t.in_flight(), 0);
}

#[tokio::test]
async fn track_async_starts_eagerly_and_ends_on_completion() {
    let t = Arc::new(ConcurrencyTracker::default());
    let fut = track_async(&t, rid("x"), async { "done" });
    assert_eq!(t.in_flight(), 1);
    assert_eq!(fut.await, "done");
    assert_eq!(t.in_flight(), 0);
}

#[tokio::test]
async fn track_async_releases_on_timeout() {
    let t = Arc::new(ConcurrencyTracker::default());
    let slow = track_async(&t, rid("x"), tokio::time::sleep(Duration::from_secs(60)));

    let res = tokio::time::timeout(Duration::from_millis(10), slow).await;
    assert!(res.is_err());
    assert_eq!(t.in_flight(), 0);
}

#[tokio::test]
async fn overlapping_tasks_are_sampled() {
    let t = Arc::new(ConcurrencyTracker::default());
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let held = tokio::spawn(track_async(&t, rid("a"), async move {
        let _ = rx.await;
    }));
    track_async(&t, rid("b"), async {}).await;
    tx.send(()).unwrap();
    held.await.unwrap();

    let snap = t.snapshot();
    assert!(snap.current.is_empty());
    assert_eq!(snap.peak(), 2);
}
