//! Typed request bodies
//!
//! Raw JSON is checked field by field so a rejection can name every field at
//! fault. Keys other than the four book fields are ignored, including `_id`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user-editable fields of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Description,
    PublishedYear,
}

impl Field {
    /// JSON key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Description => "description",
            Field::PublishedYear => "publishedYear",
        }
    }

    /// Parse a field from its wire key or a loose user spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Some(Field::Title),
            "author" => Some(Field::Author),
            "description" => Some(Field::Description),
            "publishedyear" | "published_year" | "year" => Some(Field::PublishedYear),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a request body was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required fields: {}", join_fields(.0))]
    Missing(Vec<Field>),

    #[error("Invalid value for '{0}': {1}")]
    Invalid(Field, &'static str),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::key)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub published_year: i32,
}

impl NewBook {
    /// Validate a raw JSON body.
    ///
    /// `title` and `author` must be non-blank strings and `publishedYear` an
    /// integer; `description` is optional.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let obj = as_object(&value)?;

        let title = string_field(obj, Field::Title)?;
        let author = string_field(obj, Field::Author)?;
        let description = string_field(obj, Field::Description)?;
        let published_year = year_field(obj)?;

        let mut missing = Vec::new();
        if title.as_deref().map_or(true, is_blank) {
            missing.push(Field::Title);
        }
        if author.as_deref().map_or(true, is_blank) {
            missing.push(Field::Author);
        }
        if published_year.is_none() {
            missing.push(Field::PublishedYear);
        }

        match (title, author, published_year) {
            (Some(title), Some(author), Some(published_year)) if missing.is_empty() => Ok(Self {
                title,
                author,
                description,
                published_year,
            }),
            _ => Err(ValidationError::Missing(missing)),
        }
    }
}

/// Body of an update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

impl BookPatch {
    /// Validate a raw JSON body. A `null` value counts as absent.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let obj = as_object(&value)?;

        let title = string_field(obj, Field::Title)?;
        let author = string_field(obj, Field::Author)?;
        let description = string_field(obj, Field::Description)?;
        let published_year = year_field(obj)?;

        if title.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::Invalid(Field::Title, "must not be blank"));
        }
        if author.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::Invalid(Field::Author, "must not be blank"));
        }

        Ok(Self {
            title,
            author,
            description,
            published_year,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.published_year.is_none()
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value.as_object().ok_or(ValidationError::NotAnObject)
}

fn string_field(obj: &Map<String, Value>, field: Field) -> Result<Option<String>, ValidationError> {
    match obj.get(field.key()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::Invalid(field, "expected a string")),
    }
}

fn year_field(obj: &Map<String, Value>) -> Result<Option<i32>, ValidationError> {
    match obj.get(Field::PublishedYear.key()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or(ValidationError::Invalid(
                Field::PublishedYear,
                "expected an integer year",
            )),
        Some(_) => Err(ValidationError::Invalid(
            Field::PublishedYear,
            "expected an integer year",
        )),
    }
}
