//! # Bookshelf client
//!
//! A form/list front-end over the book API:
//!
//! - [`BooksApi`]: the four remote calls, with [`HttpBooksApi`] over HTTP
//! - [`BookForm`]: the draft record being typed in
//! - [`Bookshelf`]: the single state container (records, draft, phase)
//! - [`view`]: plain-text rendering for terminals

pub mod api;
pub mod app;
pub mod errors;
pub mod form;
pub mod view;

pub use api::{BooksApi, HttpBooksApi};
pub use app::{Bookshelf, Phase};
pub use errors::{AppError, ClientError, ClientResult};
pub use form::{BookForm, FormError};
