//! Error types for the todo service.
//!
//! # Design
//! Only two kinds reach a client: validation failures (400, nothing touched
//! the store) and store failures (500, the store's message passed through
//! verbatim). Malformed JSON bodies and non-integer path ids are folded into
//! the validation kind so every error shares the `{success:false, error}` body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::model::Failure;

/// Errors raised by a `TodoStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("store connection lock poisoned")]
    LockPoisoned,

    /// Free-form failure, used by test doubles.
    #[error("{0}")]
    Other(String),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Validation(msg) => debug!(%msg, "request rejected"),
            ApiError::Store(err) => error!(error = %err, "store operation failed"),
        }
        let body = Failure {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation("desc is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "desc is required");
    }

    #[test]
    fn store_error_message_is_passed_through() {
        let err = ApiError::from(StoreError::Other("connection refused".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn sqlite_error_is_transparent() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.to_string(), rusqlite::Error::QueryReturnedNoRows.to_string());
    }
}
