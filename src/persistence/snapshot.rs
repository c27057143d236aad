//! On-disk document layout for the catalogue
//!
//! ```json
//! {
//!   "books": { "<isbn>": { "isbn": "...", "title": "...", "author": "...",
//!                          "total_copies": 1, "issued_copies": 0,
//!                          "added_on": "2024-05-01T09:30:00.000000Z" } },
//!   "title_index":  { "<lowercase title>":  ["<isbn>"] },
//!   "author_index": { "<lowercase author>": ["<isbn>"] }
//! }
//! ```

use crate::catalogue::{Book, Catalogue, KeyIndex, DEFAULT_TOTAL_COPIES};
use crate::{LibraryError, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Whole-file snapshot. Missing top-level fields read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueSnapshot {
    #[serde(default)]
    pub books: BTreeMap<String, BookDocument>,
    #[serde(default)]
    pub title_index: KeyIndex,
    #[serde(default)]
    pub author_index: KeyIndex,
}

/// One stored record, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    /// Falls back to the map key when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default = "default_total_copies", deserialize_with = "lenient_count")]
    pub total_copies: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub issued_copies: u32,
    /// Stamped with the load time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<String>,
}

fn default_total_copies() -> u32 {
    DEFAULT_TOTAL_COPIES
}

/// Accept counts written as integers, integral floats or numeric strings
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    let count = match &value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    count
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| {
            D::Error::custom(format!("expected a non-negative copy count, got {}", value))
        })
}

/// Parse RFC 3339, or an offset-less ISO-8601 timestamp taken as UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| LibraryError::InvalidRecord(format!("bad timestamp '{}': {}", raw, e)))
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl BookDocument {
    pub fn from_book(book: &Book) -> Self {
        Self {
            isbn: Some(book.isbn.clone()),
            title: book.title.clone(),
            author: book.author.clone(),
            total_copies: book.total_copies(),
            issued_copies: book.issued_copies(),
            added_on: Some(format_timestamp(&book.added_on)),
        }
    }

    /// Validate and build the record stored under `key`
    pub fn into_book(self, key: &str) -> Result<Book> {
        let isbn = self.isbn.unwrap_or_else(|| key.to_string());
        if isbn != key {
            return Err(LibraryError::InvalidRecord(format!(
                "record stored under '{}' has ISBN '{}'",
                key, isbn
            )));
        }

        let book = Book::new(isbn, self.title, self.author)?
            .with_copies(self.total_copies)?
            .with_issued(self.issued_copies)?;

        match self.added_on {
            Some(raw) => Ok(book.with_added_on(parse_timestamp(&raw)?)),
            None => Ok(book),
        }
    }
}

impl CatalogueSnapshot {
    pub fn capture(catalogue: &Catalogue) -> Self {
        Self {
            books: catalogue
                .books()
                .map(|book| (book.isbn.clone(), BookDocument::from_book(book)))
                .collect(),
            title_index: catalogue.title_index().clone(),
            author_index: catalogue.author_index().clone(),
        }
    }

    /// Build the catalogue. The stored indexes are used as they are.
    pub fn restore(self) -> Result<Catalogue> {
        let mut records = BTreeMap::new();
        for (key, document) in self.books {
            let book = document.into_book(&key)?;
            records.insert(key, book);
        }

        Ok(Catalogue::from_parts(
            records,
            self.title_index,
            self.author_index,
        ))
    }
}
