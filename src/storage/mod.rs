//! Document storage for the book catalog
//!
//! Books live in a single `books` collection behind the [`BookStore`] trait.
//! Two backends implement it:
//!
//! - [`MemoryStore`]: process-local, nothing survives a restart
//! - [`FileStore`]: an append-only record file replayed on open
//!
//! # File format
//!
//! - Append-only, no in-place updates
//! - Every record carries a CRC32 checksum, verified on every read
//! - Full-document writes; the latest record for an id wins
//! - Deletes append a tombstone
//! - Every write is fsynced before it is acknowledged

mod catalog;
mod checksum;
mod errors;
mod reader;
mod record;
mod store;
mod writer;

pub use catalog::Catalog;
pub use checksum::compute_checksum;
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use reader::StorageReader;
pub use record::{DocumentRecord, RecordError};
pub use store::{BookStore, FileStore, MemoryStore};
pub use writer::StorageWriter;

/// Name of the only collection
pub const BOOKS_COLLECTION: &str = "books";

/// Storage file name inside `<data_dir>/data/`
pub const STORAGE_FILE: &str = "books.dat";
