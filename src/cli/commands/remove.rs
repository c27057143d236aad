use super::{CommandHandler, CommandResult};
use crate::cli::session::Session;
use crate::Result;
use std::io::Write;
use tracing::warn;

/// Handler for the `remove` command
pub struct RemoveCommand {
    pub isbn: String,
}

impl CommandHandler for RemoveCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        match session.catalogue.take(&self.isbn) {
            Ok(book) => {
                session.persist()?;
                writeln!(out, "Book removed.")?;
                Ok(CommandResult::Success(Some(format!(
                    "Removed '{}' ({})",
                    book.title, book.isbn
                ))))
            }
            Err(e) => {
                warn!(isbn = %self.isbn, "Remove failed: {}", e);
                writeln!(out, "Remove failed.")?;
                Ok(CommandResult::Error(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "remove"
    }
}

impl RemoveCommand {
    /// Create new remove command
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}
