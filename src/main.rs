use anyhow::{Context, Result};
use clap::Parser;
use libris::{
    cli::commands::{handler_for, CommandResult},
    cli::{Cli, Commands, LogLevel, Session},
    config::ConfigLoader,
};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Configure logging from `--log-level`, plus any `RUST_LOG` directives.
/// Logs go to stderr so they never mix with menu output.
fn initialize_tracing(log_level: &LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(extra) = std::env::var("RUST_LOG") {
        for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let working_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let settings = ConfigLoader::new(working_dir)
        .load(&cli.overrides())
        .context("Failed to load configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::open(&settings, &mut out).with_context(|| {
        format!("Failed to open catalogue {}", settings.data_file.display())
    })?;

    let command = cli.command.unwrap_or(Commands::Shell);
    info!(command = command.name(), data_file = %settings.data_file.display(), "Running");

    let handler = handler_for(command);
    let result = handler
        .execute(&mut session, &mut out)
        .with_context(|| format!("{} failed", handler.name()))?;
    out.flush()?;

    match &result {
        CommandResult::Success(_) => {}
        CommandResult::Warning(message) => eprintln!("warning: {}", message),
        CommandResult::Error(message) => {
            error!(command = handler.name(), "{}", message);
            eprintln!("error: {}", message);
        }
    }

    if result.exit_code() != 0 {
        std::process::exit(result.exit_code());
    }
    Ok(())
}
