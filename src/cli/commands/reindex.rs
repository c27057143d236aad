use super::{CommandHandler, CommandResult};
use crate::cli::session::Session;
use crate::Result;
use std::io::Write;
use tracing::info;

/// Handler for the `reindex` command
pub struct ReindexCommand {
    pub dry_run: bool,
}

impl CommandHandler for ReindexCommand {
    fn execute(&self, session: &mut Session, out: &mut dyn Write) -> Result<CommandResult> {
        let issues = session.catalogue.index_issues();
        if issues.is_empty() {
            writeln!(out, "Indexes are consistent.")?;
            return Ok(CommandResult::Success(None));
        }

        for issue in &issues {
            writeln!(out, "- {}", issue)?;
        }

        if self.dry_run {
            return Ok(CommandResult::Warning(format!(
                "{} index issue(s) found",
                issues.len()
            )));
        }

        session.catalogue.rebuild_indexes();
        session.persist()?;
        info!(fixed = issues.len(), "Rebuilt catalogue indexes");
        writeln!(out, "Indexes rebuilt.")?;
        Ok(CommandResult::Success(Some(format!(
            "{} index issue(s) fixed",
            issues.len()
        ))))
    }

    fn name(&self) -> &'static str {
        "reindex"
    }
}

impl ReindexCommand {
    /// Create new reindex command
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}
