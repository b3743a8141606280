//! Client error types

use thiserror::Error;

use super::form::FormError;
use crate::book::BookId;

pub type ClientResult<T> = Result<T, ClientError>;

/// A remote call failed
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, transport or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },
}

/// A user action could not be completed
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected locally before any request was sent
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("No book with id {0}")]
    UnknownBook(BookId),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl AppError {
    /// Whether the action was stopped before reaching the network
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Form(_))
    }
}
