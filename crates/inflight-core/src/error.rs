//! Shared error type across inflight crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid or inconsistent configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// The configured request id source produced nothing.
    MissingRequestId,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::MissingRequestId => "MISSING_REQUEST_ID",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, InflightError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum InflightError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    /// Carries the name of the source that came up empty (e.g. the header).
    #[error("missing request id (source: {0})")]
    MissingRequestId(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl InflightError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            InflightError::BadConfig(_) => ClientCode::BadConfig,
            InflightError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            InflightError::MissingRequestId(_) => ClientCode::MissingRequestId,
            InflightError::Internal(_) => ClientCode::Internal,
        }
    }
}
