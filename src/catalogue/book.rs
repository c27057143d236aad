use crate::{LibraryError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

/// Copies a new record starts with when the caller does not say otherwise
pub const DEFAULT_TOTAL_COPIES: u32 = 1;

/// Sub-second digits kept on `added_on`, matching the stored format
const TIMESTAMP_DIGITS: u16 = 6;

/// A single catalogue entry
///
/// The copy counters are private so `issued_copies <= total_copies` holds
/// for every value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Primary key, never empty
    pub isbn: String,
    /// Display title, case preserved
    pub title: String,
    /// Display author, case preserved
    pub author: String,
    total_copies: u32,
    issued_copies: u32,
    /// When the record was created, to the microsecond
    pub added_on: DateTime<Utc>,
}

impl Book {
    /// Create a record with one copy, nothing issued, stamped now
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self> {
        let isbn = isbn.into();
        if isbn.trim().is_empty() {
            return Err(LibraryError::InvalidRecord(
                "ISBN must not be empty".to_string(),
            ));
        }

        Ok(Self {
            isbn,
            title: title.into(),
            author: author.into(),
            total_copies: DEFAULT_TOTAL_COPIES,
            issued_copies: 0,
            added_on: Utc::now().trunc_subsecs(TIMESTAMP_DIGITS),
        })
    }

    /// Set the number of copies owned. Fails below the issued count.
    pub fn with_copies(mut self, total_copies: u32) -> Result<Self> {
        if total_copies < self.issued_copies {
            return Err(self.over_issued(self.issued_copies, total_copies));
        }
        self.total_copies = total_copies;
        Ok(self)
    }

    /// Set the issued counter, e.g. when restoring a stored record
    pub fn with_issued(mut self, issued_copies: u32) -> Result<Self> {
        if issued_copies > self.total_copies {
            return Err(self.over_issued(issued_copies, self.total_copies));
        }
        self.issued_copies = issued_copies;
        Ok(self)
    }

    /// Keep an existing creation timestamp instead of "now"
    pub fn with_added_on(mut self, added_on: DateTime<Utc>) -> Self {
        self.added_on = added_on.trunc_subsecs(TIMESTAMP_DIGITS);
        self
    }

    fn over_issued(&self, issued: u32, total: u32) -> LibraryError {
        LibraryError::InvalidRecord(format!(
            "{}: issued copies ({}) exceed total copies ({})",
            self.isbn, issued, total
        ))
    }

    pub fn total_copies(&self) -> u32 {
        self.total_copies
    }

    pub fn issued_copies(&self) -> u32 {
        self.issued_copies
    }

    pub fn available_copies(&self) -> u32 {
        self.total_copies - self.issued_copies
    }

    /// Add copies to the stock. Returns how many were actually added, which
    /// is less than `copies` only when the counter would overflow.
    pub(crate) fn restock(&mut self, copies: u32) -> u32 {
        let total = self.total_copies.saturating_add(copies);
        let added = total - self.total_copies;
        self.total_copies = total;
        added
    }

    /// Issue one copy. False when none is available.
    pub(crate) fn lend(&mut self) -> bool {
        if self.available_copies() == 0 {
            return false;
        }
        self.issued_copies += 1;
        true
    }

    /// Take one copy back. False when none is issued.
    pub(crate) fn take_back(&mut self) -> bool {
        if self.issued_copies == 0 {
            return false;
        }
        self.issued_copies -= 1;
        true
    }

    /// Title key used by the title index
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }

    /// Author key used by the author index
    pub fn author_key(&self) -> String {
        self.author.to_lowercase()
    }
}
