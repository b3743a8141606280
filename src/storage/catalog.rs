//! In-memory view of the `books` collection
//!
//! Records are kept in first-insertion order, which is the order `list`
//! returns them in. Replacing a record keeps its position.

use std::collections::{BTreeMap, HashMap};

use crate::book::{Book, BookId};

#[derive(Debug, Default)]
pub struct Catalog {
    next_seq: u64,
    by_seq: BTreeMap<u64, Book>,
    seq_of: HashMap<BookId, u64>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seq.is_empty()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.seq_of.get(id).and_then(|seq| self.by_seq.get(seq))
    }

    /// Insert a new record or replace an existing one in place.
    pub fn upsert(&mut self, book: Book) {
        match self.seq_of.get(&book.id) {
            Some(seq) => {
                self.by_seq.insert(*seq, book);
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.seq_of.insert(book.id, seq);
                self.by_seq.insert(seq, book);
            }
        }
    }

    pub fn remove(&mut self, id: &BookId) -> Option<Book> {
        let seq = self.seq_of.remove(id)?;
        self.by_seq.remove(&seq)
    }

    /// Snapshot of every record in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.by_seq.values().cloned().collect()
    }
}
