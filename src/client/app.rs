//! Client state container
//!
//! `Bookshelf` owns the fetched records, the draft form and the edit phase.
//! Every action takes `&mut self`, so one container runs one flow at a time.
//!
//! Phase transitions:
//!
//! ```text
//! Idle ──begin_edit──▶ Editing(id) ──submit──▶ Submitting ──ok──▶ Idle
//!  │                        │                      │
//!  └───────submit───────────┼──────────────────────┘ (error: back to prior phase)
//!                           └──cancel_edit──▶ Idle
//! ```

use tracing::{debug, warn};

use super::api::BooksApi;
use super::errors::{AppError, ClientError};
use super::form::BookForm;
use crate::book::{Book, BookId, Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Draft creates a new record on submit
    #[default]
    Idle,
    /// Draft overwrites the given record on submit
    Editing(BookId),
    /// A create or update is in flight
    Submitting,
}

pub struct Bookshelf<A: BooksApi> {
    api: A,
    records: Vec<Book>,
    form: BookForm,
    phase: Phase,
}

impl<A: BooksApi> Bookshelf<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            records: Vec::new(),
            form: BookForm::new(),
            phase: Phase::Idle,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn records(&self) -> &[Book] {
        &self.records
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Initial fetch. A failure is logged and returned; `records` keeps its
    /// previous contents.
    pub async fn mount(&mut self) -> Result<(), AppError> {
        self.refresh().await.map_err(|e| {
            warn!(error = %e, "error fetching books");
            AppError::from(e)
        })
    }

    /// Replace `records` with the server's full list.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let books = self.api.list_books().await?;
        debug!(count = books.len(), "fetched books");
        self.records = books;
        Ok(())
    }

    /// Submit the draft: create when idle, update when editing.
    ///
    /// Validation failures never reach the network. On success the list is
    /// re-fetched and the draft reset; on failure the draft and phase are
    /// kept and nothing is re-fetched.
    pub async fn submit(&mut self) -> Result<Book, AppError> {
        let editing = match self.phase {
            Phase::Editing(id) => Some(id),
            _ => None,
        };

        let saved = match editing {
            None => {
                let new_book = self.form.validate()?;
                let previous = std::mem::replace(&mut self.phase, Phase::Submitting);
                match self.api.create_book(&new_book).await {
                    Ok(book) => book,
                    Err(e) => return Err(self.submit_failed(previous, e)),
                }
            }
            Some(id) => {
                let patch = self.form.to_patch()?;
                let previous = std::mem::replace(&mut self.phase, Phase::Submitting);
                match self.api.update_book(&id, &patch).await {
                    Ok(Some(book)) => book,
                    Ok(None) => {
                        // Gone on the server: drop the edit and show the current list.
                        self.reset_draft();
                        self.refresh().await?;
                        return Err(AppError::UnknownBook(id));
                    }
                    Err(e) => return Err(self.submit_failed(previous, e)),
                }
            }
        };

        self.reset_draft();
        self.refresh().await?;
        Ok(saved)
    }

    fn submit_failed(&mut self, previous: Phase, error: ClientError) -> AppError {
        warn!(error = %error, "error saving book");
        self.phase = previous;
        AppError::from(error)
    }

    /// Delete a record, then re-fetch on success.
    pub async fn delete(&mut self, id: BookId) -> Result<(), AppError> {
        if let Err(e) = self.api.delete_book(&id).await {
            warn!(error = %e, %id, "error deleting book");
            return Err(e.into());
        }

        if self.phase == Phase::Editing(id) {
            self.reset_draft();
        }

        self.refresh().await?;
        Ok(())
    }

    /// Load a listed record into the draft for editing.
    pub fn begin_edit(&mut self, id: BookId) -> Result<(), AppError> {
        let book = self
            .records
            .iter()
            .find(|book| book.id == id)
            .ok_or(AppError::UnknownBook(id))?;

        self.form = BookForm::from_book(book);
        self.phase = Phase::Editing(id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.form.clear();
        self.phase = Phase::Idle;
    }
}
