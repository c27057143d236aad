pub mod book;
pub mod index;
pub mod store;

pub use book::{Book, DEFAULT_TOTAL_COPIES};
pub use index::KeyIndex;
pub use store::{Catalogue, IndexIssue, IndexKind};
