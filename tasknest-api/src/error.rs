/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate HTTP status code:
///
/// - `Validation` / `InvalidIdentifier` → 400
/// - `Unauthorized` → 401
/// - `NotFound` → 404
/// - `Conflict` → 409 (unique constraint violations)
/// - `Internal` → 500 with a generic body; detail is only logged
///
/// Validation and identifier checks fail locally and immediately; ownership
/// checks short-circuit before any entity service logic runs; store failures
/// surface as 500 without leaking internal error detail to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed a validation rule (400)
    Validation(String),

    /// Malformed resource identifier in the path (400)
    InvalidIdentifier(String),

    /// Missing/invalid/expired token, or ownership mismatch (401)
    Unauthorized(String),

    /// Resource absent (404)
    NotFound(String),

    /// Unique constraint violation, e.g. duplicate email (409)
    Conflict(String),

    /// Unexpected store failure (500)
    Internal(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "validation_error", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::InvalidIdentifier(msg) => write!(f, "Invalid identifier: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::InvalidIdentifier(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_identifier", msg)
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violations
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("username") {
                        return ApiError::Conflict("Username already exists".to_string());
                    }
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                // Other database errors are internal
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert auth middleware errors to API errors
impl From<tasknest_shared::auth::middleware::AuthError> for ApiError {
    fn from(err: tasknest_shared::auth::middleware::AuthError) -> Self {
        match err {
            tasknest_shared::auth::middleware::AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing credentials".to_string())
            }
            tasknest_shared::auth::middleware::AuthError::InvalidToken(msg) => {
                ApiError::Unauthorized(msg)
            }
        }
    }
}

/// Convert password errors to API errors
impl From<tasknest_shared::auth::password::PasswordError> for ApiError {
    fn from(err: tasknest_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert token errors to API errors
impl From<tasknest_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: tasknest_shared::auth::jwt::JwtError) -> Self {
        match err {
            tasknest_shared::auth::jwt::JwtError::Expired => {
                ApiError::Unauthorized("Token expired".to_string())
            }
            tasknest_shared::auth::jwt::JwtError::InvalidIssuer => {
                ApiError::Unauthorized("Invalid token issuer".to_string())
            }
            tasknest_shared::auth::jwt::JwtError::CreateError(msg) => {
                ApiError::Internal(format!("Token creation failed: {}", msg))
            }
            e => ApiError::Unauthorized(format!("Invalid token: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Validation("Description cannot be blank.".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: Description cannot be blank."
        );

        let err = ApiError::NotFound("No task associated with that ID was found.".to_string());
        assert_eq!(
            err.to_string(),
            "Not found: No task associated with that ID was found."
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Validation("v".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidIdentifier("i".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("u".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::NotFound("n".to_string()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("c".to_string()), StatusCode::CONFLICT),
            (
                ApiError::Internal("e".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
