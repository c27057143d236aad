pub mod catalogue;
pub mod cli;
pub mod config;
pub mod error;
pub mod persistence;
pub mod seed;

pub use catalogue::{Book, Catalogue};
pub use error::{LibraryError, Result};
