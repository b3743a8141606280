//! Draft book form
//!
//! Fields hold exactly what the user typed. Conversion into a request body
//! happens on submit.

use thiserror::Error;

use crate::book::{Book, BookPatch, Field, NewBook};

/// Why a draft could not be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields: {}", join(.0))]
    MissingFields(Vec<Field>),

    #[error("Published year must be a whole number, got '{0}'")]
    InvalidYear(String),
}

fn join(fields: &[Field]) -> String {
    fields.iter().map(Field::key).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub description: String,
    pub published_year: String,
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill the form from a stored record
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone().unwrap_or_default(),
            published_year: book.published_year.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Description => &self.description,
            Field::PublishedYear => &self.published_year,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Author => self.author = value,
            Field::Description => self.description = value,
            Field::PublishedYear => self.published_year = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Required-field check, then year parsing.
    fn checked_year(&self) -> Result<i32, FormError> {
        let missing: Vec<Field> = [Field::Title, Field::Author, Field::PublishedYear]
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let year = self.published_year.trim();
        year.parse()
            .map_err(|_| FormError::InvalidYear(year.to_string()))
    }

    /// Body for a create request. An empty description is left out.
    pub fn validate(&self) -> Result<NewBook, FormError> {
        let published_year = self.checked_year()?;
        let description = self.description.trim();

        Ok(NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            published_year,
        })
    }

    /// Body for an edit. Every field is sent; an empty description clears
    /// the stored one.
    pub fn to_patch(&self) -> Result<BookPatch, FormError> {
        let published_year = self.checked_year()?;

        Ok(BookPatch {
            title: Some(self.title.trim().to_string()),
            author: Some(self.author.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            published_year: Some(published_year),
        })
    }
}
