//! CLI error types
//!
//! Every CLI error ends the process with a non-zero exit code. The code
//! string is printed ahead of the message.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::book::InvalidBookId;
use crate::client::AppError;
use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    ConfigError,
    InvalidArgument,
    IoError,
    BootFailed,
    ServerFailed,
    RequestFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOKSHELF_CLI_CONFIG_ERROR",
            Self::InvalidArgument => "BOOKSHELF_CLI_INVALID_ARGUMENT",
            Self::IoError => "BOOKSHELF_CLI_IO_ERROR",
            Self::BootFailed => "BOOKSHELF_CLI_BOOT_FAILED",
            Self::ServerFailed => "BOOKSHELF_CLI_SERVER_FAILED",
            Self::RequestFailed => "BOOKSHELF_CLI_REQUEST_FAILED",
        }
    }
}

impl fmt::Display for CliErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidBookId),

    /// Terminal I/O
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The runtime could not be built
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("Cannot open book store: {0}")]
    Store(#[from] StorageError),

    #[error("Server stopped: {0}")]
    Server(#[source] io::Error),

    #[error(transparent)]
    Request(#[from] AppError),
}

impl CliError {
    pub fn code(&self) -> CliErrorCode {
        match self {
            CliError::Config(_) => CliErrorCode::ConfigError,
            CliError::InvalidArgument(_) => CliErrorCode::InvalidArgument,
            CliError::Io(_) => CliErrorCode::IoError,
            CliError::Runtime(_) | CliError::Store(_) => CliErrorCode::BootFailed,
            CliError::Server(_) => CliErrorCode::ServerFailed,
            CliError::Request(_) => CliErrorCode::RequestFailed,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
