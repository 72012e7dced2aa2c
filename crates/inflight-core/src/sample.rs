//! Request identifiers and concurrency observations.

use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::{InflightError, Result};

/// Opaque id of one in-flight request, supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Build an id; empty strings are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(InflightError::Internal("request id must not be empty".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observation that `count` requests were running at `when`.
///
/// Field order matters: the derived `Ord` compares `count` first, so a heap of
/// samples ranks by concurrency. `when` only breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ConcurrentSample {
    pub count: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub when: OffsetDateTime,
}

impl ConcurrentSample {
    pub fn new(count: usize, when: OffsetDateTime) -> Self {
        Self { count, when }
    }

    /// Sample stamped with the current UTC time.
    pub fn now(count: usize) -> Self {
        Self::new(count, OffsetDateTime::now_utc())
    }
}
