//! Sequential storage reader
//!
//! The file is loaded once and decoded front to back. A record that fails
//! to decode stops the read with a corruption error naming its offset.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::record::DocumentRecord;
use super::STORAGE_FILE;

pub struct StorageReader {
    path: PathBuf,
    data: Vec<u8>,
    offset: usize,
}

impl StorageReader {
    /// Loads the storage file at `path` and positions the reader at its
    /// first record.
    ///
    /// # Arguments
    ///
    /// * `path` - Full path of the storage file
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the file is missing or unreadable.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let data = fs::read(path)
            .map_err(|e| StorageError::read(format!("cannot read {}", path.display()), e))?;

        Ok(Self {
            path: path.to_path_buf(),
            data,
            offset: 0,
        })
    }

    /// Opens `<data_dir>/data/books.dat`, the file a
    /// [`StorageWriter`](super::StorageWriter) for the same `data_dir` appends to.
    pub fn open_from_data_dir(data_dir: &Path) -> StorageResult<Self> {
        Self::open(&data_dir.join("data").join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the next record to decode
    pub fn current_offset(&self) -> u64 {
        self.offset as u64
    }

    pub fn has_more(&self) -> bool {
        self.offset < self.data.len()
    }

    /// Decodes the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a record was decoded
    /// - `Ok(None)` at end of file
    ///
    /// # Errors
    ///
    /// Returns the fatal `StorageError::CorruptRecord`, carrying the record's
    /// byte offset, on a checksum mismatch, a bad length or a partial
    /// trailing record. A partial tail is never treated as end of file.
    pub fn read_next(&mut self) -> StorageResult<Option<DocumentRecord>> {
        if !self.has_more() {
            return Ok(None);
        }

        let (record, used) = DocumentRecord::decode(&self.data[self.offset..]).map_err(|source| {
            StorageError::CorruptRecord {
                offset: self.current_offset(),
                source,
            }
        })?;

        self.offset += used;
        Ok(Some(record))
    }

    /// Decodes every remaining record. The first corrupt record fails the
    /// whole read.
    pub fn read_all(&mut self) -> StorageResult<Vec<DocumentRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}
