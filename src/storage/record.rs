//! On-disk document record
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record)
//! +------------------+
//! | Collection       | (u32 LE length + UTF-8)
//! +------------------+
//! | Document ID      | (u32 LE length + UTF-8)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Document Body    | (u32 LE length + JSON)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it.

use thiserror::Error;

use super::checksum::compute_checksum;

const LEN_PREFIX: usize = 4;
const CHECKSUM_LEN: usize = 4;

/// Smallest possible record: length, two empty strings, flag, empty body, checksum
pub const MIN_RECORD_SIZE: usize = LEN_PREFIX + 4 + 4 + 1 + 4 + CHECKSUM_LEN;

/// Why a byte range is not a valid record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("only {available} bytes left, a record needs at least {min}", min = MIN_RECORD_SIZE)]
    TooShort { available: usize },

    #[error("declared length {0} is below the minimum record size")]
    BadLength(usize),

    #[error("declared length {declared} but only {available} bytes left")]
    Truncated { declared: usize, available: usize },

    #[error("checksum {stored:08x} does not match contents ({computed:08x})")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("malformed {0} field")]
    Malformed(&'static str),
}

/// One appended unit of the storage file: a full document or a tombstone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub collection: String,
    pub document_id: String,
    pub is_tombstone: bool,
    /// JSON document; empty for tombstones
    pub document_body: Vec<u8>,
}

impl DocumentRecord {
    pub fn live(
        collection: impl Into<String>,
        document_id: impl Into<String>,
        document_body: Vec<u8>,
    ) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            is_tombstone: false,
            document_body,
        }
    }

    pub fn tombstone(collection: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            is_tombstone: true,
            document_body: Vec::new(),
        }
    }

    /// Size of the encoded record in bytes
    pub fn encoded_len(&self) -> usize {
        LEN_PREFIX
            + 4
            + self.collection.len()
            + 4
            + self.document_id.len()
            + 1
            + 4
            + self.document_body.len()
            + CHECKSUM_LEN
    }

    pub fn encode(&self) -> Vec<u8> {
        let total = self.encoded_len();
        let mut out = Vec::with_capacity(total);

        put_u32(&mut out, total);
        put_prefixed(&mut out, self.collection.as_bytes());
        put_prefixed(&mut out, self.document_id.as_bytes());
        out.push(u8::from(self.is_tombstone));
        put_prefixed(&mut out, &self.document_body);

        let checksum = compute_checksum(&out);
        out.extend_from_slice(&checksum.to_le_bytes());
        out
    }

    /// Decode the record at the start of `data`, checking its checksum.
    ///
    /// Returns the record and how many bytes it occupied; anything after it
    /// is left alone.
    pub fn decode(data: &[u8]) -> Result<(Self, usize), RecordError> {
        let declared = Self::declared_len(data)?;
        if data.len() < declared {
            return Err(RecordError::Truncated {
                declared,
                available: data.len(),
            });
        }

        let (covered, trailer) = data[..declared].split_at(declared - CHECKSUM_LEN);
        let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let computed = compute_checksum(covered);
        if stored != computed {
            return Err(RecordError::ChecksumMismatch { stored, computed });
        }

        let mut fields = Fields(&covered[LEN_PREFIX..]);
        let collection = fields.string("collection")?;
        let document_id = fields.string("document id")?;
        let is_tombstone = match fields.take(1, "tombstone")? {
            [0] => false,
            [1] => true,
            _ => return Err(RecordError::Malformed("tombstone")),
        };
        let document_body = fields.bytes("document body")?.to_vec();
        if !fields.0.is_empty() {
            return Err(RecordError::Malformed("record length"));
        }

        let record = Self {
            collection,
            document_id,
            is_tombstone,
            document_body,
        };
        Ok((record, declared))
    }

    /// Read and sanity-check the length prefix.
    pub fn declared_len(data: &[u8]) -> Result<usize, RecordError> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(RecordError::TooShort {
                available: data.len(),
            });
        }
        let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if declared < MIN_RECORD_SIZE {
            return Err(RecordError::BadLength(declared));
        }
        Ok(declared)
    }
}

fn put_u32(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&(value as u32).to_le_bytes());
}

fn put_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    put_u32(out, bytes.len());
    out.extend_from_slice(bytes);
}

/// Walks the checksummed fields of one record.
struct Fields<'a>(&'a [u8]);

impl<'a> Fields<'a> {
    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], RecordError> {
        if self.0.len() < n {
            return Err(RecordError::Malformed(field));
        }
        let (head, rest) = self.0.split_at(n);
        self.0 = rest;
        Ok(head)
    }

    fn bytes(&mut self, field: &'static str) -> Result<&'a [u8], RecordError> {
        let len = self.take(4, field)?;
        let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]) as usize;
        self.take(len, field)
    }

    fn string(&mut self, field: &'static str) -> Result<String, RecordError> {
        let bytes = self.bytes(field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| RecordError::Malformed(field))
    }
}
