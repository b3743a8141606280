//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--port <n>] [--data-dir <path>] [--memory]
//! - bookshelf list
//! - bookshelf add --title <t> --author <a> --year <y> [--description <d>]
//! - bookshelf update <id> [--title <t>] [--author <a>] [--year <y>] [--description <d>]
//! - bookshelf delete <id>
//! - bookshelf shell

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - a small book catalog
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where client commands send their requests
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// Collection URL, e.g. http://localhost:3000/api/books
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the book API server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for the file-backed store
        #[arg(long)]
        data_dir: Option<String>,

        /// Keep books in memory only
        #[arg(long)]
        memory: bool,
    },

    /// Print every book
    List {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Add a book
    Add {
        #[command(flatten)]
        remote: RemoteArgs,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        author: String,

        #[arg(long)]
        description: Option<String>,

        /// Published year
        #[arg(long, default_value = "")]
        year: String,
    },

    /// Edit a book; only the given fields change
    Update {
        #[command(flatten)]
        remote: RemoteArgs,

        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        year: Option<String>,
    },

    /// Delete a book
    Delete {
        #[command(flatten)]
        remote: RemoteArgs,

        id: String,
    },

    /// Interactive form/list session
    Shell {
        #[command(flatten)]
        remote: RemoteArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
