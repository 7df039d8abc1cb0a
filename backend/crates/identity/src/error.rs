//! Identity Error Types
//!
//! This module provides identity-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::ConflictField;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Email or username already taken (case-insensitive)
    #[error("User already exists: {}", .0.as_str())]
    Conflict(ConflictField),

    /// Wrong password or unknown email - deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on the request
    #[error("No token provided")]
    MissingToken,

    /// Token malformed, signature mismatch, expired, or referenced
    /// account no longer exists
    #[error("Invalid token")]
    InvalidToken,

    /// User record gone (e.g. concurrent deletion)
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::Validation(_) => StatusCode::BAD_REQUEST,
            IdentityError::Conflict(_) => StatusCode::CONFLICT,
            IdentityError::InvalidCredentials
            | IdentityError::MissingToken
            | IdentityError::InvalidToken => StatusCode::UNAUTHORIZED,
            IdentityError::UserNotFound => StatusCode::NOT_FOUND,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::BadRequest,
            IdentityError::Conflict(_) => ErrorKind::Conflict,
            IdentityError::InvalidCredentials
            | IdentityError::MissingToken
            | IdentityError::InvalidToken => ErrorKind::Unauthorized,
            IdentityError::UserNotFound => ErrorKind::NotFound,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::InvalidToken => {
                tracing::debug!("Rejected invalid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => IdentityError::Validation(err.message().to_string()),
            _ => IdentityError::Internal(err.to_string()),
        }
    }
}
