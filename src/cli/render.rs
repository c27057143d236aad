//! Plain-text output shared by the menu shell and the subcommands

use crate::catalogue::{Book, Catalogue};
use crate::persistence::snapshot::format_timestamp;
use std::io::{self, Write};

pub fn write_book(out: &mut dyn Write, book: &Book) -> io::Result<()> {
    writeln!(out, "ISBN: {}", book.isbn)?;
    writeln!(out, "Title: {}", book.title)?;
    writeln!(out, "Author: {}", book.author)?;
    writeln!(out, "Total copies: {}", book.total_copies())?;
    writeln!(out, "Issued copies: {}", book.issued_copies())?;
    writeln!(out, "Available copies: {}", book.available_copies())?;
    writeln!(out, "Added on: {}", format_timestamp(&book.added_on))
}

/// Numbered search results, or a notice when there are none
pub fn write_results(out: &mut dyn Write, books: &[&Book]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "No books found.");
    }

    for (i, book) in books.iter().enumerate() {
        writeln!(out, "\n[{}]", i + 1)?;
        write_book(out, book)?;
    }
    Ok(())
}

pub fn write_report(out: &mut dyn Write, catalogue: &Catalogue) -> io::Result<()> {
    writeln!(out, "=== Library Report ===")?;
    writeln!(out, "Total unique titles: {}", catalogue.total_unique_titles())?;
    writeln!(out, "Total copies: {}", catalogue.total_copies_count())?;
    writeln!(out, "Total issued: {}", catalogue.total_issued_count())?;
    writeln!(out, "\nAll books:")?;
    for book in catalogue.books() {
        writeln!(
            out,
            "{} | {} | ISBN:{} | Total:{} | Issued:{}",
            book.title,
            book.author,
            book.isbn,
            book.total_copies(),
            book.issued_copies()
        )?;
    }
    Ok(())
}
