//! Error kinds surfaced by account operations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Failures from a [`UserStore`](crate::users::repo::UserStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Account operation errors. Every variant is terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Email already exists")]
    Conflict,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("storage failure: {0}")]
    Storage(StoreError),

    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => AccountError::Conflict,
            other => AccountError::Storage(other),
        }
    }
}

impl AccountError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Duplicate signups share the 400 of malformed input
            AccountError::InvalidInput(_) | AccountError::Conflict => StatusCode::BAD_REQUEST,
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::Unauthorized => StatusCode::UNAUTHORIZED,
            AccountError::Storage(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AccountError::InvalidInput(_) => "invalid_input",
            AccountError::Conflict => "conflict",
            AccountError::NotFound(_) => "not_found",
            AccountError::Unauthorized => "unauthorized",
            AccountError::Storage(_) | AccountError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let message = match &self {
            AccountError::Storage(_) | AccountError::Internal(_) => {
                error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(serde_json::json!({
                "error": self.code(),
                "message": message
            })),
        )
            .into_response()
    }
}
