//! # Book REST API
//!
//! Four endpoints over the `books` collection. Each handler validates its
//! input, performs exactly one store call and serializes the result.
//!
//! | Method | Path              | Success          |
//! |--------|-------------------|------------------|
//! | POST   | `/api/books`      | 201 + record     |
//! | GET    | `/api/books`      | 200 + array      |
//! | PUT    | `/api/books/:id`  | 200 + record/null|
//! | DELETE | `/api/books/:id`  | 204              |

pub mod context;
pub mod errors;
pub mod handler;

pub use context::ServiceContext;
pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::book_routes;
