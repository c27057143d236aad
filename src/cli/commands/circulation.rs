use super::{CommandHandler, CommandResult};
use crate::cli::session::Session;
use crate::Result;
use std::io::Write;
use tracing::warn;

/// Handler for the `issue` command
pub struct IssueCommand {
    pub isbn: String,
}

impl CommandHandler for IssueCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        match session.catalogue.checkout(&self.isbn) {
            Ok(book) => {
                let available = book.available_copies();
                session.persist()?;
                writeln!(out, "Book issued.")?;
                Ok(CommandResult::Success(Some(format!(
                    "{} copies of {} still available",
                    available, self.isbn
                ))))
            }
            Err(e) => {
                warn!(isbn = %self.isbn, "Issue failed: {}", e);
                writeln!(out, "Issue failed.")?;
                Ok(CommandResult::Error(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "issue"
    }
}

impl IssueCommand {
    /// Create new issue command
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

/// Handler for the `return` command
pub struct ReturnCommand {
    pub isbn: String,
}

impl CommandHandler for ReturnCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        match session.catalogue.checkin(&self.isbn) {
            Ok(book) => {
                let available = book.available_copies();
                session.persist()?;
                writeln!(out, "Book returned.")?;
                Ok(CommandResult::Success(Some(format!(
                    "{} copies of {} now available",
                    available, self.isbn
                ))))
            }
            Err(e) => {
                warn!(isbn = %self.isbn, "Return failed: {}", e);
                writeln!(out, "Return failed.")?;
                Ok(CommandResult::Error(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "return"
    }
}

impl ReturnCommand {
    /// Create new return command
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}
