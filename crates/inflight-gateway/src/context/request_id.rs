//! Request id resolution.
//!
//! Ids come from a header set by the hosting proxy/runtime, or are minted
//! locally when the host provides none. Header ids must be unique among
//! in-flight requests; a duplicate is logged by the tracker and not counted.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::{HeaderMap, HeaderName};

use inflight_core::error::{InflightError, Result};
use inflight_core::RequestId;

use crate::config::{RequestIdSection, RequestIdSourceKind};

#[derive(Debug)]
pub enum RequestIdSource {
    Header(HeaderName),
    Generate { seq: AtomicU64 },
}

impl RequestIdSource {
    pub fn from_config(cfg: &RequestIdSection) -> Result<Self> {
        match cfg.source {
            RequestIdSourceKind::Header => {
                let name = HeaderName::from_bytes(cfg.header.trim().as_bytes()).map_err(|e| {
                    InflightError::BadConfig(format!(
                        "request_id.header is not a valid header name ({}): {e}",
                        cfg.header
                    ))
                })?;
                Ok(Self::Header(name))
            }
            RequestIdSourceKind::Generate => Ok(Self::Generate {
                seq: AtomicU64::new(1),
            }),
        }
    }

    /// Human-readable name of the source, used in errors and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Header(name) => format!("header {name}"),
            Self::Generate { .. } => "generator".to_string(),
        }
    }

    /// Resolve the id for one request.
    pub fn resolve(&self, headers: &HeaderMap) -> Result<RequestId> {
        match self {
            Self::Header(name) => headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| InflightError::MissingRequestId(self.describe()))
                .and_then(RequestId::new),
            Self::Generate { seq } => {
                let n = seq.fetch_add(1, Ordering::Relaxed);
                RequestId::new(format!("req-{n:016x}"))
            }
        }
    }
}
