//! Gateway error types and the HTTP status mapping.
//!
//! Every workflow error is rendered as the one JSON error envelope
//! `{success: false, message}`. Store faults are logged with their detail
//! and surfaced as an opaque 500; internals never leak to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared_types::WorkflowError;
use tracing::error;

/// A request-level error ready to be rendered.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the given client-facing message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let status = match &err {
            WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
            WorkflowError::NotFound(_) => StatusCode::NOT_FOUND,
            // The client treats a second redemption as a conflict but a
            // re-join as an ordinary rejection.
            WorkflowError::AlreadyRedeemed => StatusCode::CONFLICT,
            WorkflowError::AlreadyJoined => StatusCode::BAD_REQUEST,
            WorkflowError::InsufficientFunds => StatusCode::BAD_REQUEST,
            WorkflowError::Store(store_err) => {
                error!(error = %store_err, "store failure surfaced to client");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server Error");
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

/// Gateway-level errors (startup, not per-request).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}
