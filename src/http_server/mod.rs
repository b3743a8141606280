//! # Bookshelf HTTP Server Module
//!
//! Combines the endpoint routers into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/books` - Book catalog CRUD

pub mod config;
pub mod health;
pub mod server;

pub use config::{HttpServerConfig, DEFAULT_PORT};
pub use server::HttpServer;
