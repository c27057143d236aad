pub mod add;
pub mod circulation;
pub mod lookup;
pub mod reindex;
pub mod remove;
pub mod report;
pub mod shell;

use super::app::Commands;
use super::session::Session;
use crate::Result;
use std::io::Write;

pub use add::AddCommand;
pub use circulation::{IssueCommand, ReturnCommand};
pub use lookup::{SearchCommand, ShowCommand};
pub use reindex::ReindexCommand;
pub use remove::RemoveCommand;
pub use report::ReportCommand;
pub use shell::ShellCommand;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Run against the open session, writing user-facing text to `out`
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Command execution result
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Success with optional message
    Success(Option<String>),
    /// Error with message
    Error(String),
    /// Warning with message
    Warning(String),
}

impl CommandResult {
    /// Convert to exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Success(_) => 0,
            CommandResult::Error(_) => 1,
            CommandResult::Warning(_) => 0,
        }
    }

    /// Get message if any
    pub fn message(&self) -> Option<&str> {
        match self {
            CommandResult::Success(msg) => msg.as_deref(),
            CommandResult::Error(msg) => Some(msg),
            CommandResult::Warning(msg) => Some(msg),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CommandResult::Success(_))
    }
}

/// Build the handler for a parsed subcommand
pub fn handler_for(command: Commands) -> Box<dyn CommandHandler> {
    match command {
        Commands::Shell => Box::new(ShellCommand),
        Commands::Add {
            isbn,
            title,
            author,
            copies,
            overwrite,
        } => Box::new(AddCommand::new(isbn, title, author, copies, overwrite)),
        Commands::Search { query, by } => Box::new(SearchCommand::new(by, query)),
        Commands::Show { isbn } => Box::new(ShowCommand::new(isbn)),
        Commands::Issue { isbn } => Box::new(IssueCommand::new(isbn)),
        Commands::Return { isbn } => Box::new(ReturnCommand::new(isbn)),
        Commands::Remove { isbn } => Box::new(RemoveCommand::new(isbn)),
        Commands::Report => Box::new(ReportCommand),
        Commands::Reindex { dry_run } => Box::new(ReindexCommand::new(dry_run)),
    }
}
