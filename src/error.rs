use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application error taxonomy. Every failure path surfaces as one of these;
/// internal detail stays in the server log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request field, rejected before any store access.
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique field (username/email).
    #[error("{0}")]
    Conflict(String),

    /// Login-time credential failure (unknown user, wrong password).
    #[error("{0}")]
    Credentials(String),

    /// Bearer-token failure on a protected route.
    #[error("{0}")]
    Unauthorized(String),

    /// Token was valid but its expiry has elapsed. Distinct from other token
    /// failures so clients can prompt re-login.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// Resource absent, or owned by another user (indistinguishable by design).
    #[error("{0}")]
    NotFound(String),

    /// Store or cryptographic failure. Clients get a generic message.
    #[error("Something went wrong on the server")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::Credentials(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) | ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref source) = self {
            error!(error = %source, "internal error");
        }
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(
            ApiError::Validation("All fields are required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("Username or email already exists".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Credentials("Invalid credentials".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("Invalid token".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::SessionExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("Expense not found or not owned by user".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_body_is_generic() {
        let msg = ApiError::Internal(anyhow::anyhow!("connection refused")).to_string();
        assert_eq!(msg, "Something went wrong on the server");
        assert!(!msg.contains("connection refused"));
    }

    #[test]
    fn expired_session_has_distinct_message() {
        assert_eq!(
            ApiError::SessionExpired.to_string(),
            "Session expired. Please log in again."
        );
    }
}
