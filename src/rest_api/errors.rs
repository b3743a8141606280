//! # REST API Errors
//!
//! Client errors are 400 with the reason. Store failures are 500 with a
//! generic message; the cause only goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::book::{InvalidBookId, ValidationError};
use crate::storage::StorageError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not JSON, or not sent as JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body is JSON but does not fit the schema
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidId(#[from] InvalidBookId),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Internal error")]
    Internal(#[from] StorageError),
}

impl RestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match &self {
            RestError::Internal(cause) => {
                tracing::error!(error = %cause, code = %cause.code(), "store operation failed");
            }
            other => tracing::debug!(error = %other, "rejected request"),
        }

        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
