//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every endpoint returns
//! the same failure envelope: `{"success": false, "message", "error"?}`.
//!
//! # Key invariants and assumptions
//! - Status codes align with the error taxonomy: 400 invalid argument,
//!   401 unauthenticated, 403 forbidden, 404 not found, 409 conflict,
//!   500 internal.
//! - Internal errors log details server-side but return a generic message;
//!   clients never see stack traces or store internals.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Structured API error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn envelope(message: &str) -> ErrorResponse {
    ErrorResponse {
        success: false,
        message: message.to_string(),
        error: None,
    }
}

/// Build a 400 Bad Request error for malformed or invalid input.
pub fn api_bad_request(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        body: envelope(message),
    }
}

/// Build a 400 error with a validation detail string.
pub fn api_validation_error(message: &str, detail: String) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        body: ErrorResponse {
            success: false,
            message: message.to_string(),
            error: Some(detail),
        },
    }
}

/// Build a 401 Unauthorized error.
pub fn api_unauthorized(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::UNAUTHORIZED,
        body: envelope(message),
    }
}

/// Build a 403 Forbidden error.
pub fn api_forbidden(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::FORBIDDEN,
        body: envelope(message),
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        body: envelope(message),
    }
}

/// Build a 409 Conflict error.
pub fn api_conflict(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::CONFLICT,
        body: envelope(message),
    }
}

/// Build a 500 Internal Server Error from a store error.
///
/// Logs the store error server-side and returns a generic message.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "studymate storage error");
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: envelope(message),
    }
}

/// Build a 500 Internal Server Error without a store error.
pub fn api_internal_message(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: envelope(message),
    }
}
