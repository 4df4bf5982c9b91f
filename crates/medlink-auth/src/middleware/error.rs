//! Error response handling.
//!
//! Implements `IntoResponse` for `AuthError`: the single place where error
//! kinds become HTTP status codes and `{"msg"}` JSON bodies. Handlers just
//! propagate `AuthError` with `?`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = error_details(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "msg": message }))).into_response()
    }
}

/// Maps an error to its HTTP status and response message.
///
/// Token failures collapse to one generic message so the body never reveals
/// whether a token was absent, malformed, or expired; details go to the logs.
/// Server-side failures likewise hide their internals.
fn error_details(error: &AuthError) -> (StatusCode, String) {
    match error {
        AuthError::Validation { message } | AuthError::Conflict { message } => {
            (StatusCode::BAD_REQUEST, message.clone())
        }
        AuthError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        AuthError::InvalidToken { .. } | AuthError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            "Authentication invalid".to_string(),
        ),
        AuthError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
        AuthError::Storage { .. }
        | AuthError::Configuration { .. }
        | AuthError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong, please try again later".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::validation("missing name"), StatusCode::BAD_REQUEST),
            (AuthError::conflict("duplicate email"), StatusCode::BAD_REQUEST),
            (AuthError::invalid_credentials(), StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (
                AuthError::invalid_token("bad signature"),
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::not_found("Route not found"), StatusCode::NOT_FOUND),
            (
                AuthError::storage("connection refused"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let (status, _) = error_details(&error);
            assert_eq!(status, expected, "wrong status for {error}");
        }
    }

    #[test]
    fn test_token_failures_share_one_message() {
        let (_, expired) = error_details(&AuthError::TokenExpired);
        let (_, invalid) = error_details(&AuthError::invalid_token("bad header"));
        assert_eq!(expired, invalid);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let (_, message) = error_details(&AuthError::storage("password column dropped"));
        assert!(!message.contains("password column"));
    }
}
