// crates/clipforge-server/src/error.rs
//
// Maps the domain error taxonomy onto HTTP statuses. Validation errors are
// surfaced verbatim under "message" (the shape clients key off); not-found
// never distinguishes malformed from unknown ids.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use clipforge_core::ValidationErrors;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or unknown id — indistinguishable by design.
    NotFound,
    /// Well-formed request against a project with a video job in flight:
    /// acknowledged but deferred, distinct from validation failure.
    Busy,
    /// Field-scoped rejection of an edit request.
    Validation(ValidationErrors),
    /// Malformed request body or upload.
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Busy => {
                (StatusCode::ACCEPTED, Json(json!({"processing": true}))).into_response()
            }
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({"message": errors}))).into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"message": message}))).into_response()
            }
            ApiError::Internal(e) => {
                error!("[server] internal error: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}
