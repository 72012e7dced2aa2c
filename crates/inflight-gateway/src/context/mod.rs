//! Per-request context resolved before the wrapped handler runs.
//!
//! The interceptor needs exactly one thing from the request: an id that
//! names it while it is in flight.

pub mod request_id;
