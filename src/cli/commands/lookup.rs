use super::{CommandHandler, CommandResult};
use crate::cli::app::SearchField;
use crate::cli::render::{write_book, write_results};
use crate::cli::session::Session;
use crate::{LibraryError, Result};
use std::io::Write;

/// Handler for the `search` command
pub struct SearchCommand {
    pub field: SearchField,
    pub query: String,
}

impl CommandHandler for SearchCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        let results = match self.field {
            SearchField::Title => session.catalogue.search_by_title(&self.query),
            SearchField::Author => session.catalogue.search_by_author(&self.query),
        };

        write_results(out, &results)?;
        Ok(CommandResult::Success(None))
    }

    fn name(&self) -> &'static str {
        "search"
    }
}

impl SearchCommand {
    /// Create new search command
    pub fn new(field: SearchField, query: String) -> Self {
        Self { field, query }
    }
}

/// Handler for the `show` command
pub struct ShowCommand {
    pub isbn: String,
}

impl CommandHandler for ShowCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        match session.catalogue.get_book(&self.isbn) {
            Some(book) => {
                write_book(out, book)?;
                Ok(CommandResult::Success(None))
            }
            None => {
                writeln!(out, "No books found.")?;
                Ok(CommandResult::Error(
                    LibraryError::NotFound(self.isbn.clone()).to_string(),
                ))
            }
        }
    }

    fn name(&self) -> &'static str {
        "show"
    }
}

impl ShowCommand {
    /// Create new show command
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}
