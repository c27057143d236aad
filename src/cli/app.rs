use crate::config::Overrides;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Libris: a small library catalogue manager
#[derive(Parser)]
#[command(name = "libris")]
#[command(version = "0.1.0")]
#[command(about = "Track books, copies and loans for a small library")]
#[command(
    long_about = "Libris keeps a catalogue of books keyed by ISBN, with title and author search, issue/return tracking and a JSON data file. Run without a subcommand for the interactive menu."
)]
pub struct Cli {
    /// Catalogue data file (default: library_data.json)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Config file (default: ./libris.yaml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not add the demo books to an empty catalogue
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Log verbosity, written to stderr
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            data_file: self.data_file.clone(),
            no_seed: self.no_seed,
        }
    }
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Indexed field to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchField {
    Title,
    Author,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive numbered menu (the default)
    Shell,

    /// Add a book, or add copies to an existing ISBN
    Add {
        isbn: String,
        title: String,
        author: String,

        /// Number of copies
        #[arg(short, long, default_value_t = 1)]
        copies: u32,

        /// Replace an existing record instead of adding copies to it
        #[arg(long)]
        overwrite: bool,
    },

    /// Case-insensitive substring search
    Search {
        /// Text to look for; empty lists everything
        #[arg(default_value = "")]
        query: String,

        /// Field to search
        #[arg(long, value_enum, default_value = "title")]
        by: SearchField,
    },

    /// Show one book
    Show { isbn: String },

    /// Issue one copy
    Issue { isbn: String },

    /// Return one copy
    Return { isbn: String },

    /// Remove a book from the catalogue
    Remove { isbn: String },

    /// Totals and a listing of every book
    Report,

    /// Check the title/author indexes and rebuild them from the records
    Reindex {
        /// Only list problems
        #[arg(long)]
        dry_run: bool,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Shell => "shell",
            Commands::Add { .. } => "add",
            Commands::Search { .. } => "search",
            Commands::Show { .. } => "show",
            Commands::Issue { .. } => "issue",
            Commands::Return { .. } => "return",
            Commands::Remove { .. } => "remove",
            Commands::Report => "report",
            Commands::Reindex { .. } => "reindex",
        }
    }
}
