//! Stored book record and its identifier

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payload::{BookPatch, NewBook};

/// Store-assigned book identifier.
///
/// Serialized as the bare UUID string under the `_id` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned when a path segment is not a valid book identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid book id: {0}")]
pub struct InvalidBookId(pub String);

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidBookId(s.to_string()))
    }
}

/// A book as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub published_year: i32,
}

impl Book {
    /// Materialize a new record, assigning a fresh identifier.
    pub fn create(new: NewBook) -> Self {
        Self {
            id: BookId::new(),
            title: new.title,
            author: new.author,
            description: new.description.and_then(non_blank),
            published_year: new.published_year,
        }
    }

    /// Merge a patch into this record. Absent fields keep their value; a
    /// blank `description` clears it.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(description) = patch.description {
            self.description = non_blank(description);
        }
        if let Some(year) = patch.published_year {
            self.published_year = year;
        }
    }
}

/// Blank descriptions are not stored, so create and edit agree.
fn non_blank(description: String) -> Option<String> {
    (!description.trim().is_empty()).then_some(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: None,
            published_year: 1965,
        }
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let a = Book::create(dune());
        let b = Book::create(dune());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_shape() {
        let book = Book::create(dune());
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value["_id"], json!(book.id.to_string()));
        assert_eq!(value["title"], "Dune");
        assert_eq!(value["publishedYear"], 1965);
        assert!(value.get("description").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_apply_merges_present_fields_only() {
        let mut book = Book::create(dune());
        book.apply(BookPatch {
            published_year: Some(1966),
            ..Default::default()
        });

        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.published_year, 1966);
    }

    #[test]
    fn test_blank_description_is_not_stored() {
        let mut book = Book::create(NewBook {
            description: Some("  ".to_string()),
            ..dune()
        });
        assert_eq!(book.description, None);

        book.apply(BookPatch {
            description: Some("Spice".to_string()),
            ..Default::default()
        });
        assert_eq!(book.description.as_deref(), Some("Spice"));

        book.apply(BookPatch {
            description: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(book.description, None);
        assert!(serde_json::to_value(&book).unwrap().get("description").is_none());
    }

    #[test]
    fn test_parse_id() {
        let id = BookId::new();
        let parsed: BookId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        let err = "not-an-id".parse::<BookId>().unwrap_err();
        assert_eq!(err, InvalidBookId("not-an-id".to_string()));
    }
}
