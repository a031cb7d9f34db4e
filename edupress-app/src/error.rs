//! App error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    AccountExists,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not allowed for this role")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Password too short (minimum 8 characters)")]
    PasswordTooShort,

    #[error("Password too long (maximum 80 characters)")]
    PasswordTooLong,

    #[error("Invalid reset code")]
    InvalidResetCode,

    #[error("Reset code expired")]
    ResetExpired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<edupress_core::Error> for AppError {
    fn from(e: edupress_core::Error) -> Self {
        match e {
            edupress_core::Error::Json(e) => AppError::Internal(e.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AppError::AccountExists => (StatusCode::CONFLICT, "User already exists"),
            AppError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Not allowed for this role"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            AppError::PasswordTooShort => {
                (StatusCode::BAD_REQUEST, "Password too short (minimum 8 characters)")
            }
            AppError::PasswordTooLong => {
                (StatusCode::BAD_REQUEST, "Password too long (maximum 80 characters)")
            }
            AppError::InvalidResetCode => (StatusCode::BAD_REQUEST, "Invalid reset code"),
            AppError::ResetExpired => (StatusCode::BAD_REQUEST, "Reset code expired"),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "success": false, "reason": message });
        (status, axum::Json(body)).into_response()
    }
}
