//! Numbered-menu interactive loop
//!
//! Each menu entry delegates to the matching subcommand handler, so the
//! menu and the one-shot commands print and persist the same way.

use super::{
    AddCommand, CommandHandler, CommandResult, IssueCommand, RemoveCommand, ReportCommand,
    ReturnCommand, SearchCommand,
};
use crate::catalogue::DEFAULT_TOTAL_COPIES;
use crate::cli::app::SearchField;
use crate::cli::session::Session;
use crate::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

const MENU: &str = "
Library Manager
1) Add book
2) Search by title
3) Search by author
4) Issue book
5) Return book
6) Remove book
7) Report
8) Save
9) Exit
";

/// Handler for the `shell` command (and a bare `libris`)
pub struct ShellCommand;

impl CommandHandler for ShellCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        let stdin = io::stdin();
        Shell::new(session, stdin.lock(), out).run()?;
        Ok(CommandResult::Success(None))
    }

    fn name(&self) -> &'static str {
        "shell"
    }
}

/// The menu loop over any line source and sink
pub struct Shell<'a, R, W> {
    session: &'a mut Session,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(session: &'a mut Session, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    /// Run until "9" or end of input; both save before leaving
    pub fn run(mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose (1-9): ")? else {
                break;
            };

            let finished = match choice.as_str() {
                "1" => self.add_book()?,
                "2" => self.search(SearchField::Title, "Search title: ")?,
                "3" => self.search(SearchField::Author, "Search author: ")?,
                "4" => self.by_isbn("Enter ISBN to issue: ", IssueCommand::new)?,
                "5" => self.by_isbn("Enter ISBN to return: ", ReturnCommand::new)?,
                "6" => self.by_isbn("Enter ISBN to remove: ", RemoveCommand::new)?,
                "7" => {
                    self.dispatch(&ReportCommand)?;
                    false
                }
                "8" => {
                    self.session.persist()?;
                    writeln!(self.out, "Saved.")?;
                    false
                }
                "9" => break,
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    false
                }
            };

            if finished {
                break;
            }
        }

        self.session.persist()?;
        writeln!(self.out, "Goodbye.")?;
        Ok(())
    }

    /// Print `text` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn dispatch(&mut self, handler: &dyn CommandHandler) -> Result<()> {
        let result = handler.execute(&mut *self.session, &mut self.out)?;
        if let Some(message) = result.message() {
            debug!(command = handler.name(), "{}", message);
        }
        Ok(())
    }

    // The helpers below return `true` when input ran out mid-prompt.

    fn add_book(&mut self) -> Result<bool> {
        let Some(isbn) = self.prompt("Enter ISBN: ")? else {
            return Ok(true);
        };
        let Some(title) = self.prompt("Enter Title: ")? else {
            return Ok(true);
        };
        let Some(author) = self.prompt("Enter Author: ")? else {
            return Ok(true);
        };
        let Some(raw_copies) = self.prompt("Enter number of copies: ")? else {
            return Ok(true);
        };

        let copies = parse_copies(&raw_copies);
        self.dispatch(&AddCommand::new(isbn, title, author, copies, false))?;
        Ok(false)
    }

    fn search(&mut self, field: SearchField, text: &str) -> Result<bool> {
        let Some(query) = self.prompt(text)? else {
            return Ok(true);
        };
        self.dispatch(&SearchCommand::new(field, query))?;
        Ok(false)
    }

    fn by_isbn<H: CommandHandler>(
        &mut self,
        text: &str,
        build: impl FnOnce(String) -> H,
    ) -> Result<bool> {
        let Some(isbn) = self.prompt(text)? else {
            return Ok(true);
        };
        self.dispatch(&build(isbn))?;
        Ok(false)
    }
}

/// Copies typed at the prompt; blank or malformed input means one copy
pub fn parse_copies(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_TOTAL_COPIES;
    }
    raw.parse().unwrap_or(DEFAULT_TOTAL_COPIES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::dune_session;
    use crate::persistence;
    use pretty_assertions::assert_eq;

    fn drive(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        Shell::new(session, script.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_copies() {
        assert_eq!(parse_copies(""), 1);
        assert_eq!(parse_copies(" 4 "), 4);
        assert_eq!(parse_copies("lots"), 1);
        assert_eq!(parse_copies("-2"), 1);
    }

    #[test]
    fn test_exit_saves() {
        let (mut session, _temp_dir) = dune_session();

        let text = drive(&mut session, "9\n");
        assert!(text.contains("Library Manager\n1) Add book\n"));
        assert!(text.ends_with("Goodbye.\n"));
        assert_eq!(persistence::load(session.file.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_end_of_input_behaves_like_exit() {
        let (mut session, _temp_dir) = dune_session();

        let text = drive(&mut session, "");
        assert!(text.ends_with("Goodbye.\n"));
        assert!(session.file.exists());
    }

    #[test]
    fn test_add_then_search() {
        let (mut session, _temp_dir) = dune_session();

        let text = drive(
            &mut session,
            "1\n222\nEmma\nJane Austen\nabc\n3\naust\n9\n",
        );
        assert!(text.contains("Book added."));
        assert!(text.contains(
            "[1]\nISBN: 222\nTitle: Emma\nAuthor: Jane Austen\nTotal copies: 1\n"
        ));

        let stored = persistence::load(session.file.path()).unwrap();
        assert_eq!(stored.get_book("222").map(|b| b.total_copies()), Some(1));
    }

    #[test]
    fn test_circulation_messages() {
        let (mut session, _temp_dir) = dune_session();

        let text = drive(&mut session, "4\n111\n4\n111\n4\n111\n5\n111\n5\n999\n9\n");
        assert_eq!(text.matches("Book issued.").count(), 2);
        assert_eq!(text.matches("Issue failed.").count(), 1);
        assert_eq!(text.matches("Book returned.").count(), 1);
        assert_eq!(text.matches("Return failed.").count(), 1);
        assert_eq!(session.catalogue.get_book("111").unwrap().issued_copies(), 1);
    }

    #[test]
    fn test_remove_report_and_invalid_choice() {
        let (mut session, _temp_dir) = dune_session();

        let text = drive(&mut session, "x\n7\n6\n111\n6\n111\n2\n\n8\n9\n");
        assert!(text.contains("Invalid choice."));
        assert!(text.contains("Dune | Frank Herbert | ISBN:111 | Total:2 | Issued:0"));
        assert!(text.contains("Book removed."));
        assert!(text.contains("Remove failed."));
        assert!(text.contains("No books found."));
        assert!(text.contains("Saved."));
        assert!(session.catalogue.is_empty());
    }

    #[test]
    fn test_input_ending_mid_add() {
        let (mut session, _temp_dir) = dune_session();

        let text = drive(&mut session, "1\n333\nUlysses\n");
        assert!(!text.contains("Book added."));
        assert!(text.ends_with("Goodbye.\n"));
        assert!(session.catalogue.get_book("333").is_none());
    }
}
