//! The `BookStore` trait and its two backends

use std::path::Path;
use std::sync::{Mutex, RwLock};

use tracing::{debug, info};

use crate::book::{Book, BookId, BookPatch, NewBook};

use super::catalog::Catalog;
use super::errors::{StorageError, StorageResult};
use super::reader::StorageReader;
use super::record::DocumentRecord;
use super::writer::StorageWriter;
use super::BOOKS_COLLECTION;

/// Operations the API service performs against the document store.
///
/// Each HTTP handler maps to exactly one call.
pub trait BookStore: Send + Sync {
    /// Store a new record, assigning its identifier
    fn insert(&self, book: NewBook) -> StorageResult<Book>;

    /// Every record, in insertion order
    fn list(&self) -> StorageResult<Vec<Book>>;

    /// Merge `patch` into the record. `None` if the id is unknown.
    fn update(&self, id: &BookId, patch: BookPatch) -> StorageResult<Option<Book>>;

    /// Remove the record. Returns whether it existed.
    fn delete(&self, id: &BookId) -> StorageResult<bool>;
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("store lock poisoned".to_string())
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: RwLock<Catalog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookStore for MemoryStore {
    fn insert(&self, book: NewBook) -> StorageResult<Book> {
        let book = Book::create(book);
        let mut catalog = self.catalog.write().map_err(|_| poisoned())?;
        catalog.upsert(book.clone());
        Ok(book)
    }

    fn list(&self) -> StorageResult<Vec<Book>> {
        let catalog = self.catalog.read().map_err(|_| poisoned())?;
        Ok(catalog.list())
    }

    fn update(&self, id: &BookId, patch: BookPatch) -> StorageResult<Option<Book>> {
        let mut catalog = self.catalog.write().map_err(|_| poisoned())?;
        let Some(mut book) = catalog.get(id).cloned() else {
            return Ok(None);
        };
        book.apply(patch);
        catalog.upsert(book.clone());
        Ok(Some(book))
    }

    fn delete(&self, id: &BookId) -> StorageResult<bool> {
        let mut catalog = self.catalog.write().map_err(|_| poisoned())?;
        Ok(catalog.remove(id).is_some())
    }
}

struct FileStoreInner {
    writer: StorageWriter,
    catalog: Catalog,
}

/// Durable store over an append-only record file.
///
/// The file is replayed into a [`Catalog`] on open; reads are served from the
/// catalog and every mutation is appended and fsynced before the catalog is
/// touched.
pub struct FileStore {
    inner: Mutex<FileStoreInner>,
}

impl FileStore {
    /// Opens (or creates) the store under `data_dir` and replays its file.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - The root data directory; records live in
    ///   `<data_dir>/data/books.dat`
    ///
    /// # Errors
    ///
    /// - `StorageError::Read` / `StorageError::Write` if the file cannot be
    ///   opened
    /// - A fatal `StorageError::CorruptRecord` or `CorruptDocument` if any
    ///   record is damaged; nothing is served from a damaged file
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let writer = StorageWriter::open(data_dir)?;
        let catalog = Self::replay(writer.path())?;

        info!(
            path = %writer.path().display(),
            books = catalog.len(),
            "opened book store"
        );

        Ok(Self {
            inner: Mutex::new(FileStoreInner { writer, catalog }),
        })
    }

    fn replay(path: &Path) -> StorageResult<Catalog> {
        let mut reader = StorageReader::open(path)?;
        let mut catalog = Catalog::new();
        let mut applied = 0usize;

        while let Some(record) = reader.read_next()? {
            if record.collection != BOOKS_COLLECTION {
                debug!(collection = %record.collection, "skipping record from foreign collection");
                continue;
            }

            let id: BookId = record
                .document_id
                .parse()
                .map_err(|_| StorageError::corrupt_document(&record.document_id, "not a book id"))?;

            if record.is_tombstone {
                catalog.remove(&id);
            } else {
                let book: Book = serde_json::from_slice(&record.document_body)
                    .map_err(|e| StorageError::corrupt_document(&record.document_id, e.to_string()))?;
                if book.id != id {
                    return Err(StorageError::corrupt_document(
                        &record.document_id,
                        "body id does not match record id",
                    ));
                }
                catalog.upsert(book);
            }
            applied += 1;
        }

        debug!(records = applied, "replayed storage file");
        Ok(catalog)
    }

    fn write_document(writer: &mut StorageWriter, book: &Book) -> StorageResult<()> {
        let body = serde_json::to_vec(book).map_err(|e| StorageError::Encode {
            document_id: book.id.to_string(),
            reason: e.to_string(),
        })?;
        writer.write(&DocumentRecord::live(
            BOOKS_COLLECTION,
            book.id.to_string(),
            body,
        ))?;
        Ok(())
    }
}

impl BookStore for FileStore {
    fn insert(&self, book: NewBook) -> StorageResult<Book> {
        let book = Book::create(book);
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        Self::write_document(&mut inner.writer, &book)?;
        inner.catalog.upsert(book.clone());

        debug!(id = %book.id, "inserted book");
        Ok(book)
    }

    fn list(&self) -> StorageResult<Vec<Book>> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;
        Ok(inner.catalog.list())
    }

    fn update(&self, id: &BookId, patch: BookPatch) -> StorageResult<Option<Book>> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        let Some(mut book) = inner.catalog.get(id).cloned() else {
            return Ok(None);
        };

        book.apply(patch);
        Self::write_document(&mut inner.writer, &book)?;
        inner.catalog.upsert(book.clone());

        debug!(id = %book.id, "updated book");
        Ok(Some(book))
    }

    fn delete(&self, id: &BookId) -> StorageResult<bool> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        if inner.catalog.get(id).is_none() {
            return Ok(false);
        }

        inner
            .writer
            .write(&DocumentRecord::tombstone(BOOKS_COLLECTION, id.to_string()))?;
        inner.catalog.remove(id);

        debug!(id = %id, "deleted book");
        Ok(true)
    }
}
