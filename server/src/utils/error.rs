//! Unified error handling
//!
//! Application-level error taxonomy mapped to HTTP responses:
//! - [`AppError`] - application error enum
//! - [`AppResult`] - handler result alias
//!
//! Every failure surfaces to the caller as a JSON body with a
//! human-readable `message`; nothing is silently swallowed and nothing
//! is retried at this layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// JSON error payload returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Application error enum
///
/// | Kind | HTTP status |
/// |------|-------------|
/// | Validation / InsufficientInventory | 400 |
/// | Unauthorized / TokenExpired / InvalidToken | 401 |
/// | NotFound | 404 |
/// | Database / Internal | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("{0}")]
    Unauthorized(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== Business logic errors (4xx) ==========
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InsufficientInventory(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            AppError::Validation(msg) | AppError::InsufficientInventory(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<crate::db::repository::RepoError> for AppError {
    fn from(e: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Not Authorized, No Token".to_string())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Unified message to prevent username enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Unauthorized("Invalid username or password".to_string())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
