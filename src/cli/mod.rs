//! CLI module for Bookshelf
//!
//! Provides command-line interface for:
//! - serve: run the book API
//! - list / add / update / delete: one-shot client actions
//! - shell: interactive form/list front-end

mod args;
mod commands;
mod errors;
pub mod shell;

pub use args::{Cli, Command, RemoteArgs};
pub use commands::{resolve_config, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};

use crate::logging;

/// Parse arguments, set up logging and a runtime, and dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let filter = match cli.command {
        Command::Serve { .. } => logging::SERVER_FILTER,
        _ => logging::CLIENT_FILTER,
    };
    logging::init(filter);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(CliError::Runtime)?;
    runtime.block_on(run_command(cli))
}
