//! Interactive form/list session
//!
//! Reads one command per line and prints results as plain text. Errors from
//! individual commands are printed and the session continues.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::book::{BookId, Field};
use crate::client::{view, BooksApi, Bookshelf};

use super::errors::CliResult;

const HELP: &str = "\
Commands:
  list                   re-fetch and show all books
  form                   show the draft
  set <field> <value>    edit the draft (title, author, description, year)
  submit                 save the draft (create, or update while editing)
  edit <id>              load a book into the draft
  cancel                 discard the draft and stop editing
  delete <id>            delete a book
  help                   show this text
  quit                   leave";

/// Result of one shell line
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the session until `quit` or end of input.
pub async fn run_shell<A, R, W>(app: &mut Bookshelf<A>, input: R, output: &mut W) -> CliResult<()>
where
    A: BooksApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match app.mount().await {
        Ok(()) => writeln!(output, "{}", view::render_list(app.records()))?,
        Err(e) => writeln!(output, "Could not load books: {}", e)?,
    }
    writeln!(output, "Type 'help' for commands.")?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if execute(app, line.trim(), output).await? == Flow::Quit {
            break;
        }
        output.flush()?;
    }
    Ok(())
}

async fn execute<A, W>(app: &mut Bookshelf<A>, line: &str, output: &mut W) -> CliResult<Flow>
where
    A: BooksApi,
    W: Write,
{
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => writeln!(output, "{}", HELP)?,
        "quit" | "exit" => return Ok(Flow::Quit),
        "list" | "ls" => match app.refresh().await {
            Ok(()) => writeln!(output, "{}", view::render_list(app.records()))?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        },
        "form" => writeln!(output, "{}", view::render_form(app.form(), app.phase()))?,
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match Field::parse(name) {
                Some(field) => app.set_field(field, value.trim()),
                None => writeln!(output, "Unknown field '{}'", name)?,
            }
        }
        "submit" => match app.submit().await {
            Ok(book) => {
                writeln!(output, "Saved {}", view::render_book(&book))?;
                writeln!(output, "{}", view::render_list(app.records()))?;
            }
            Err(e) => writeln!(output, "Error: {}", e)?,
        },
        "edit" => match parse_id(rest) {
            Ok(id) => match app.begin_edit(id) {
                Ok(()) => writeln!(output, "{}", view::render_form(app.form(), app.phase()))?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Err(message) => writeln!(output, "{}", message)?,
        },
        "cancel" => {
            app.cancel_edit();
            writeln!(output, "Draft cleared")?;
        }
        "delete" | "rm" => match parse_id(rest) {
            Ok(id) => match app.delete(id).await {
                Ok(()) => writeln!(output, "{}", view::render_list(app.records()))?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Err(message) => writeln!(output, "{}", message)?,
        },
        other => writeln!(output, "Unknown command '{}'. Type 'help'.", other)?,
    }

    Ok(Flow::Continue)
}

fn parse_id(s: &str) -> Result<BookId, String> {
    if s.is_empty() {
        return Err("Missing book id".to_string());
    }
    s.parse().map_err(|e: crate::book::InvalidBookId| e.to_string())
}
