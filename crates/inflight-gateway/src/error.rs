//! HTTP mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use inflight_core::error::{ClientCode, InflightError};

/// Response wrapper so core errors can be returned from axum handlers.
#[derive(Debug)]
pub struct ApiError(pub InflightError);

impl From<InflightError> for ApiError {
    fn from(e: InflightError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        // All codes are server-side faults, including a missing request id.
        let status = match code {
            ClientCode::BadConfig
            | ClientCode::UnsupportedVersion
            | ClientCode::MissingRequestId
            | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
