//! Error types for the todo API client.
//!
//! # Design
//! The server answers every failure with `{success: false, error}`, so a
//! 4xx/5xx carrying that body becomes `Rejected` with the server's message.
//! Anything else that is not a 200 lands in `HttpError` with the raw body.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `TodoApp` actions.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server refused the request and said why (400 validation, 500 store).
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// A non-200 status without the server's error envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 200 envelope whose `success` flag was false.
    #[error("server reported failure: {0}")]
    Unsuccessful(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
