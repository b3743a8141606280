//! Service context shared by every handler

use std::sync::Arc;

use crate::storage::{BookStore, MemoryStore};

/// Explicitly constructed handler state. Holds the store handle.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn BookStore>,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Context over a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &dyn BookStore {
        self.store.as_ref()
    }
}
