//! Top-level facade crate for inflight.
//!
//! Re-exports the concurrency tracker and the gateway library so users can depend on a single crate.

pub mod core {
    pub use inflight_core::*;
}

pub mod gateway {
    pub use inflight_gateway::*;
}
