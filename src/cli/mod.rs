pub mod app;
pub mod commands;
pub mod render;
pub mod session;

pub use app::{Cli, Commands, LogLevel, SearchField};
pub use session::Session;
