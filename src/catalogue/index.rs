//! Case-folded secondary index from a key (title or author) to ISBNs
//!
//! Buckets are never left empty by `insert`/`remove`. A restored index is
//! taken as-is, so it may contain whatever the snapshot held.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Map of lowercase key -> set of ISBNs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyIndex {
    buckets: BTreeMap<String, BTreeSet<String>>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from stored buckets without any normalisation
    pub fn from_buckets(buckets: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { buckets }
    }

    /// Add `isbn` under `key`
    pub fn insert(&mut self, key: String, isbn: &str) {
        self.buckets
            .entry(key)
            .or_default()
            .insert(isbn.to_string());
    }

    /// Remove `isbn` from the bucket at `key`, dropping the bucket once empty
    pub fn remove(&mut self, key: &str, isbn: &str) -> bool {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        let removed = bucket.remove(isbn);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        removed
    }

    /// ISBNs of every bucket whose key contains `needle` (already lowercased)
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.buckets
            .iter()
            .filter(move |(key, _)| key.contains(needle))
            .flat_map(|(_, isbns)| isbns.iter().map(String::as_str))
    }

    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.buckets.get(key)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.buckets.iter()
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
