//! Error types for the save/load API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures surfaced to HTTP clients as `{ "error", "status" }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be read as the expected JSON shape.
    #[error("invalid request body: {message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest { status, .. } => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("serve error: {0}")]
    Serve(String),
}
