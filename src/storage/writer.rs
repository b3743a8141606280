//! Append-only storage writer
//!
//! `write` returns only after the record is on disk (fsync). A failed write
//! is never acknowledged, and its partial bytes are cut off again so the
//! file keeps ending on a record boundary.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use super::errors::{StorageError, StorageResult};
use super::record::DocumentRecord;
use super::STORAGE_FILE;

pub struct StorageWriter {
    path: PathBuf,
    file: File,
    /// Length of the file up to the last acknowledged record
    end: u64,
    /// Set when a failed append could not be rolled back
    torn: bool,
}

impl StorageWriter {
    /// Opens `<data_dir>/data/books.dat` for appending.
    ///
    /// Creates the file and its `data` directory if they do not exist.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - The root data directory
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the directory or file cannot be
    /// created, and `StorageError::Read` if its length cannot be read.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let dir = data_dir.join("data");
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::write(format!("cannot create {}", dir.display()), e))?;

        let path = dir.join(STORAGE_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::write(format!("cannot open {}", path.display()), e))?;
        let end = file
            .metadata()
            .map_err(|e| StorageError::read(format!("cannot stat {}", path.display()), e))?
            .len();

        Ok(Self {
            path,
            file,
            end,
            torn: false,
        })
    }

    /// Path of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset the next record will be written at
    pub fn current_offset(&self) -> u64 {
        self.end
    }

    /// Appends one record and fsyncs the file.
    ///
    /// # Arguments
    ///
    /// * `record` - The record to append
    ///
    /// # Returns
    ///
    /// The byte offset the record starts at.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the append or the fsync fails. The
    /// file is truncated back to the previous record boundary first. If that
    /// truncation also fails, this and every later write return
    /// `StorageError::Unavailable`.
    pub fn write(&mut self, record: &DocumentRecord) -> StorageResult<u64> {
        self.append_with(record, |file, bytes| file.write_all(bytes))
    }

    /// `write` with the byte copy supplied by the caller, so tests can fail
    /// it partway.
    pub(crate) fn append_with<F>(&mut self, record: &DocumentRecord, copy: F) -> StorageResult<u64>
    where
        F: FnOnce(&mut File, &[u8]) -> io::Result<()>,
    {
        if self.torn {
            return Err(StorageError::Unavailable(format!(
                "{} has an unrecoverable partial record",
                self.path.display()
            )));
        }

        let bytes = record.encode();
        let appended = copy(&mut self.file, &bytes).and_then(|()| self.file.sync_all());

        if let Err(e) = appended {
            warn!(error = %e, document_id = %record.document_id, "append failed, rolling back");
            self.roll_back();
            return Err(StorageError::write(
                format!("cannot append record for {}", record.document_id),
                e,
            ));
        }

        let offset = self.end;
        self.end += bytes.len() as u64;
        Ok(offset)
    }

    /// Cut the file back to the last acknowledged record.
    fn roll_back(&mut self) {
        let truncated = self
            .file
            .set_len(self.end)
            .and_then(|()| self.file.sync_all());

        if let Err(e) = truncated {
            error!(
                error = %e,
                path = %self.path.display(),
                end = self.end,
                "cannot truncate partial record; refusing further writes"
            );
            self.torn = true;
        }
    }
}
