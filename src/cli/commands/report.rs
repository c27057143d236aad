use super::{CommandHandler, CommandResult};
use crate::cli::render::write_report;
use crate::cli::session::Session;
use crate::Result;
use std::io::Write;

/// Handler for the `report` command
pub struct ReportCommand;

impl CommandHandler for ReportCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        write_report(out, &session.catalogue)?;
        Ok(CommandResult::Success(None))
    }

    fn name(&self) -> &'static str {
        "report"
    }
}
