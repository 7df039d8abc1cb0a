//! Feed Error Types
//!
//! Feed-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

/// Feed-specific result type alias
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed-specific error variants
#[derive(Debug, Error)]
pub enum FeedError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Path parameter is not a well-formed post identifier
    #[error("Invalid post ID")]
    InvalidPostId,

    /// Post does not exist
    #[error("Post not found")]
    PostNotFound,

    /// Post absent or the caller is not its author. The two cases are
    /// deliberately indistinguishable.
    #[error("Post not found or you are not the author")]
    NotFoundOrNotAuthor,

    /// Authenticated user record gone (e.g. concurrent deletion)
    #[error("User not found")]
    UserNotFound,

    /// Second share of the same post by the same user
    #[error("Post already shared by this user")]
    AlreadyShared,

    /// Media storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FeedError::Validation(_)
            | FeedError::InvalidPostId
            | FeedError::AlreadyShared => StatusCode::BAD_REQUEST,
            FeedError::PostNotFound
            | FeedError::NotFoundOrNotAuthor
            | FeedError::UserNotFound => StatusCode::NOT_FOUND,
            // Rejected uploads are client errors, I/O failures are not
            FeedError::Storage(
                StorageError::UnsupportedMediaType(_) | StorageError::TooLarge { .. },
            ) => StatusCode::BAD_REQUEST,
            FeedError::Storage(_) | FeedError::Database(_) | FeedError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedError::Validation(_)
            | FeedError::InvalidPostId
            | FeedError::AlreadyShared => ErrorKind::BadRequest,
            FeedError::PostNotFound
            | FeedError::NotFoundOrNotAuthor
            | FeedError::UserNotFound => ErrorKind::NotFound,
            FeedError::Storage(
                StorageError::UnsupportedMediaType(_) | StorageError::TooLarge { .. },
            ) => ErrorKind::BadRequest,
            FeedError::Storage(_) | FeedError::Database(_) | FeedError::Internal(_) => {
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
            FeedError::Database(e) => {
                tracing::error!(error = %e, "Feed database error");
            }
            FeedError::Storage(e) if self.status_code().is_server_error() => {
                tracing::error!(error = %e, "Media storage error");
            }
            FeedError::Internal(msg) => {
                tracing::error!(message = %msg, "Feed internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Feed error");
            }
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
