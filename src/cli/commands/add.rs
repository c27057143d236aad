use super::{CommandHandler, CommandResult};
use crate::catalogue::Book;
use crate::cli::session::Session;
use crate::Result;
use std::io::Write;

/// Handler for the `add` command
pub struct AddCommand {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub copies: u32,
    pub overwrite: bool,
}

impl CommandHandler for AddCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        let book = Book::new(self.isbn.as_str(), self.title.as_str(), self.author.as_str())
            .and_then(|book| book.with_copies(self.copies));
        let book = match book {
            Ok(book) => book,
            Err(e) => {
                writeln!(out, "Add failed.")?;
                return Ok(CommandResult::Error(e.to_string()));
            }
        };

        let total = session.catalogue.add_book(book, self.overwrite).total_copies();
        session.persist()?;

        writeln!(out, "Book added.")?;
        Ok(CommandResult::Success(Some(format!(
            "{} now has {} copies",
            self.isbn, total
        ))))
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

impl AddCommand {
    /// Create new add command
    pub fn new(isbn: String, title: String, author: String, copies: u32, overwrite: bool) -> Self {
        Self {
            isbn,
            title,
            author,
            copies,
            overwrite,
        }
    }
}
