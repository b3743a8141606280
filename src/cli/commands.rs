//! CLI command implementations
//!
//! `serve` owns the store and the HTTP server. Every other command is a thin
//! client driving a [`Bookshelf`] against the configured API.

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::book::{BookId, Field};
use crate::client::{view, Bookshelf, HttpBooksApi};
use crate::config::{BookshelfConfig, StorageBackend};
use crate::http_server::HttpServer;
use crate::rest_api::ServiceContext;

use super::args::{Cli, Command, RemoteArgs};
use super::errors::{CliError, CliResult};
use super::shell::run_shell;

/// Load the config file when given, otherwise use defaults.
pub fn resolve_config(path: Option<&Path>) -> CliResult<BookshelfConfig> {
    match path {
        Some(path) => Ok(BookshelfConfig::load(path)?),
        None => Ok(BookshelfConfig::default()),
    }
}

pub async fn run_command(cli: Cli) -> CliResult<()> {
    let mut config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Serve {
            port,
            data_dir,
            memory,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.storage.data_dir = data_dir;
            }
            if memory {
                config.storage.backend = StorageBackend::Memory;
            }
            config.validate()?;
            serve(config).await
        }
        Command::List { remote } => {
            let mut app = connect(&mut config, remote)?;
            app.mount().await?;
            print_list(&app)
        }
        Command::Add {
            remote,
            title,
            author,
            description,
            year,
        } => {
            let mut app = connect(&mut config, remote)?;
            app.set_field(Field::Title, title);
            app.set_field(Field::Author, author);
            app.set_field(Field::Description, description.unwrap_or_default());
            app.set_field(Field::PublishedYear, year);

            let book = app.submit().await?;
            println!("Added {}  [{}]", view::render_book(&book), book.id);
            print_list(&app)
        }
        Command::Update {
            remote,
            id,
            title,
            author,
            description,
            year,
        } => {
            let id: BookId = id.parse()?;
            let mut app = connect(&mut config, remote)?;
            app.mount().await?;
            app.begin_edit(id)?;

            let changes = [
                (Field::Title, title),
                (Field::Author, author),
                (Field::Description, description),
                (Field::PublishedYear, year),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    app.set_field(field, value);
                }
            }

            let book = app.submit().await?;
            println!("Updated {}  [{}]", view::render_book(&book), book.id);
            print_list(&app)
        }
        Command::Delete { remote, id } => {
            let id: BookId = id.parse()?;
            let mut app = connect(&mut config, remote)?;
            app.delete(id).await?;
            print_list(&app)
        }
        Command::Shell { remote } => {
            let mut app = connect(&mut config, remote)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_shell(&mut app, stdin, &mut io::stdout()).await
        }
    }
}

fn connect(config: &mut BookshelfConfig, remote: RemoteArgs) -> CliResult<Bookshelf<HttpBooksApi>> {
    if let Some(base_url) = remote.base_url {
        config.client.base_url = base_url;
    }
    config.validate()?;
    Ok(Bookshelf::new(HttpBooksApi::new(config.client.base_url.clone())))
}

fn print_list(app: &Bookshelf<HttpBooksApi>) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", view::render_list(app.records()))?;
    stdout.flush()?;
    Ok(())
}

async fn serve(config: BookshelfConfig) -> CliResult<()> {
    info!(
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir,
        "opening book store"
    );

    let store = config.storage.open_store()?;

    let server = HttpServer::with_context(config.server, ServiceContext::new(store));
    server
        .start()
        .await
        .map_err(CliError::Server)
}
