//! Book records and the request schemas that create or modify them.
//!
//! `Book` is the stored shape. `NewBook` and `BookPatch` are the typed
//! request bodies accepted at the service boundary; both are parsed from raw
//! JSON and validated before anything reaches the store.

mod payload;
mod record;

pub use payload::{BookPatch, Field, NewBook, ValidationError};
pub use record::{Book, BookId, InvalidBookId};
