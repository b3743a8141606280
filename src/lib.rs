//! bookshelf - a small book catalog
//!
//! A REST API over an embedded document store, and a form/list client
//! that consumes it.

pub mod book;
pub mod cli;
pub mod client;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod rest_api;
pub mod storage;
