//! Storage error types
//!
//! | Code | Severity |
//! |---|---|
//! | `BOOKSHELF_STORAGE_IO_ERROR` | ERROR |
//! | `BOOKSHELF_STORAGE_WRITE_FAILED` | ERROR |
//! | `BOOKSHELF_STORAGE_READ_FAILED` | ERROR |
//! | `BOOKSHELF_DATA_CORRUPTION` | FATAL |
//!
//! A fatal error means the file cannot be trusted and the store must not be
//! served.

use std::fmt;
use std::io;

use thiserror::Error;

use super::record::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation fails, the store stays usable
    Error,
    /// The store must not be used
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    IoError,
    WriteFailed,
    ReadFailed,
    DataCorruption,
}

impl StorageErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::IoError => "BOOKSHELF_STORAGE_IO_ERROR",
            StorageErrorCode::WriteFailed => "BOOKSHELF_STORAGE_WRITE_FAILED",
            StorageErrorCode::ReadFailed => "BOOKSHELF_STORAGE_READ_FAILED",
            StorageErrorCode::DataCorruption => "BOOKSHELF_DATA_CORRUPTION",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::DataCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// The store handle can no longer be used (poisoned lock)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("{context}: {source}")]
    Read {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    Write {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode document {document_id}: {reason}")]
    Encode { document_id: String, reason: String },

    #[error("corrupt record at byte {offset}: {source}")]
    CorruptRecord {
        offset: u64,
        #[source]
        source: RecordError,
    },

    #[error("corrupt document {document_id}: {reason}")]
    CorruptDocument { document_id: String, reason: String },
}

impl StorageError {
    pub fn read(context: impl Into<String>, source: io::Error) -> Self {
        StorageError::Read {
            context: context.into(),
            source,
        }
    }

    pub fn write(context: impl Into<String>, source: io::Error) -> Self {
        StorageError::Write {
            context: context.into(),
            source,
        }
    }

    pub fn corrupt_document(document_id: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::CorruptDocument {
            document_id: document_id.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> StorageErrorCode {
        match self {
            StorageError::Unavailable(_) => StorageErrorCode::IoError,
            StorageError::Read { .. } => StorageErrorCode::ReadFailed,
            StorageError::Write { .. } | StorageError::Encode { .. } => {
                StorageErrorCode::WriteFailed
            }
            StorageError::CorruptRecord { .. } | StorageError::CorruptDocument { .. } => {
                StorageErrorCode::DataCorruption
            }
        }
    }

    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
