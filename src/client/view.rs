//! Plain-text rendering of the list and the draft form

use super::app::Phase;
use super::form::BookForm;
use crate::book::{Book, Field};

/// One list entry: `Dune by Herbert (1965)`
pub fn render_book(book: &Book) -> String {
    format!("{} by {} ({})", book.title, book.author, book.published_year)
}

/// The whole list, one entry per line with its id.
pub fn render_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "(no books)".to_string();
    }

    books
        .iter()
        .map(|book| format!("{}  [{}]", render_book(book), book.id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_form(form: &BookForm, phase: Phase) -> String {
    let heading = match phase {
        Phase::Editing(id) => format!("Editing {}", id),
        Phase::Submitting => "Saving...".to_string(),
        Phase::Idle => "New book".to_string(),
    };

    let mut out = heading;
    for (label, field) in [
        ("Title", Field::Title),
        ("Author", Field::Author),
        ("Description", Field::Description),
        ("Published Year", Field::PublishedYear),
    ] {
        out.push_str(&format!("\n  {:<15} {}", format!("{}:", label), form.get(field)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::NewBook;

    fn dune() -> Book {
        Book::create(NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: None,
            published_year: 1965,
        })
    }

    #[test]
    fn test_render_book() {
        assert_eq!(render_book(&dune()), "Dune by Herbert (1965)");
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(&[]), "(no books)");

        let book = dune();
        assert_eq!(
            render_list(std::slice::from_ref(&book)),
            format!("Dune by Herbert (1965)  [{}]", book.id)
        );
    }

    #[test]
    fn test_render_form_heading_follows_phase() {
        let book = dune();
        let form = BookForm::from_book(&book);

        let idle = render_form(&BookForm::new(), Phase::Idle);
        assert!(idle.starts_with("New book"));

        let editing = render_form(&form, Phase::Editing(book.id));
        assert!(editing.starts_with(&format!("Editing {}", book.id)));
        assert!(editing.contains("Title:          Dune"));
    }
}
