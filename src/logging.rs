//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the caller's default directives
//! apply. Output goes to stderr so command output on stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

/// Directives for the API server
pub const SERVER_FILTER: &str = "info,bookshelf=debug,tower_http=debug";

/// Directives for client commands
pub const CLIENT_FILTER: &str = "warn";

/// Install the global subscriber. Later calls are no-ops.
pub fn init(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
