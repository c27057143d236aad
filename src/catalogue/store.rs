use super::book::Book;
use super::index::KeyIndex;
use crate::{LibraryError, Result};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Which secondary index an [`IndexIssue`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Title,
    Author,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Title => write!(f, "title"),
            IndexKind::Author => write!(f, "author"),
        }
    }
}

/// A disagreement between the records and one of the indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexIssue {
    /// Bucket references an ISBN that has no record
    Dangling {
        index: IndexKind,
        key: String,
        isbn: String,
    },
    /// Record is filed under a key that no longer matches it
    Misfiled {
        index: IndexKind,
        key: String,
        isbn: String,
    },
    /// Record is absent from the bucket for its own key
    Missing { index: IndexKind, isbn: String },
    /// Bucket with no ISBNs
    EmptyBucket { index: IndexKind, key: String },
}

impl fmt::Display for IndexIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexIssue::Dangling { index, key, isbn } => {
                write!(f, "{} index '{}' lists unknown ISBN {}", index, key, isbn)
            }
            IndexIssue::Misfiled { index, key, isbn } => {
                write!(f, "{} index '{}' lists ISBN {} under the wrong key", index, key, isbn)
            }
            IndexIssue::Missing { index, isbn } => {
                write!(f, "ISBN {} is missing from the {} index", isbn, index)
            }
            IndexIssue::EmptyBucket { index, key } => {
                write!(f, "{} index has an empty bucket '{}'", index, key)
            }
        }
    }
}

/// The in-memory catalogue: records plus title/author indexes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    records: BTreeMap<String, Book>,
    title_index: KeyIndex,
    author_index: KeyIndex,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a catalogue from stored parts. Indexes are used verbatim.
    pub fn from_parts(
        records: BTreeMap<String, Book>,
        title_index: KeyIndex,
        author_index: KeyIndex,
    ) -> Self {
        Self {
            records,
            title_index,
            author_index,
        }
    }

    /// Add a record.
    ///
    /// An unknown ISBN is inserted and indexed. A known ISBN either has its
    /// copies topped up by `book.total_copies()` (title, author, issued count
    /// and timestamp of the existing record are kept, and the total stops at
    /// `u32::MAX`), or with `overwrite` is replaced outright and re-indexed.
    pub fn add_book(&mut self, book: Book, overwrite: bool) -> &Book {
        let isbn = book.isbn.clone();

        if let Some(existing) = self.records.remove(&isbn) {
            if overwrite {
                debug!(isbn = %isbn, "Replacing existing record");
                self.deindex(&existing);
            } else {
                let mut merged = existing;
                let added = merged.restock(book.total_copies());
                if added < book.total_copies() {
                    warn!(
                        isbn = %isbn,
                        requested = book.total_copies(),
                        added,
                        "Copy count reached its limit, restock capped"
                    );
                }
                debug!(
                    isbn = %isbn,
                    added,
                    total = merged.total_copies(),
                    "Restocked existing record"
                );
                return self.records.entry(isbn).or_insert(merged);
            }
        } else {
            debug!(isbn = %isbn, title = %book.title, "Adding new record");
        }

        self.index(&book);
        self.records.entry(isbn).or_insert(book)
    }

    /// Remove a record, returning it
    pub fn take(&mut self, isbn: &str) -> Result<Book> {
        let book = self
            .records
            .remove(isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))?;
        self.deindex(&book);
        debug!(isbn = %isbn, "Removed record");
        Ok(book)
    }

    /// Remove a record. False when the ISBN is unknown.
    pub fn remove_book(&mut self, isbn: &str) -> bool {
        self.take(isbn).is_ok()
    }

    pub fn get_book(&self, isbn: &str) -> Option<&Book> {
        self.records.get(isbn)
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.records.contains_key(isbn)
    }

    /// Case-insensitive substring search over title keys, sorted by title
    pub fn search_by_title(&self, query: &str) -> Vec<&Book> {
        self.search(&self.title_index, query, |book| book.title.as_str())
    }

    /// Case-insensitive substring search over author keys, sorted by author
    pub fn search_by_author(&self, query: &str) -> Vec<&Book> {
        self.search(&self.author_index, query, |book| book.author.as_str())
    }

    fn search<'a>(
        &'a self,
        index: &'a KeyIndex,
        query: &str,
        field: fn(&Book) -> &str,
    ) -> Vec<&'a Book> {
        let needle = query.to_lowercase();

        let mut hits: BTreeMap<&str, &Book> = BTreeMap::new();
        for isbn in index.matching(&needle) {
            match self.records.get(isbn) {
                Some(book) => {
                    hits.insert(isbn, book);
                }
                None => warn!(isbn = %isbn, "Index refers to a missing record, skipping"),
            }
        }

        let mut results: Vec<&Book> = hits.into_values().collect();
        results.sort_by_cached_key(|book| field(book).to_lowercase());
        results
    }

    /// Check a copy out
    pub fn checkout(&mut self, isbn: &str) -> Result<&Book> {
        let book = self
            .records
            .get_mut(isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))?;

        if !book.lend() {
            return Err(LibraryError::NoCopiesAvailable(isbn.to_string()));
        }

        debug!(isbn = %isbn, issued = book.issued_copies(), "Issued copy");
        Ok(&*book)
    }

    /// Check a copy back in
    pub fn checkin(&mut self, isbn: &str) -> Result<&Book> {
        let book = self
            .records
            .get_mut(isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))?;

        if !book.take_back() {
            return Err(LibraryError::NothingIssued(isbn.to_string()));
        }

        debug!(isbn = %isbn, issued = book.issued_copies(), "Returned copy");
        Ok(&*book)
    }

    /// Issue one copy. False if the ISBN is unknown or nothing is available.
    pub fn issue_book(&mut self, isbn: &str) -> bool {
        match self.checkout(isbn) {
            Ok(_) => true,
            Err(e) => {
                debug!("Issue rejected: {}", e);
                false
            }
        }
    }

    /// Return one copy. False if the ISBN is unknown or nothing is issued.
    pub fn return_book(&mut self, isbn: &str) -> bool {
        match self.checkin(isbn) {
            Ok(_) => true,
            Err(e) => {
                debug!("Return rejected: {}", e);
                false
            }
        }
    }

    /// Number of records. Counts ISBNs, not distinct title strings.
    pub fn total_unique_titles(&self) -> usize {
        self.records.len()
    }

    pub fn total_copies_count(&self) -> u64 {
        self.records.values().map(|b| u64::from(b.total_copies())).sum()
    }

    pub fn total_issued_count(&self) -> u64 {
        self.records.values().map(|b| u64::from(b.issued_copies())).sum()
    }

    /// All records ordered by ISBN
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn title_index(&self) -> &KeyIndex {
        &self.title_index
    }

    pub fn author_index(&self) -> &KeyIndex {
        &self.author_index
    }

    /// Every way the indexes disagree with the records
    pub fn index_issues(&self) -> Vec<IndexIssue> {
        let mut issues = Vec::new();
        self.audit_index(IndexKind::Title, &self.title_index, Book::title_key, &mut issues);
        self.audit_index(IndexKind::Author, &self.author_index, Book::author_key, &mut issues);
        issues
    }

    fn audit_index(
        &self,
        kind: IndexKind,
        index: &KeyIndex,
        key_of: fn(&Book) -> String,
        issues: &mut Vec<IndexIssue>,
    ) {
        for (key, isbns) in index.buckets() {
            if isbns.is_empty() {
                issues.push(IndexIssue::EmptyBucket {
                    index: kind,
                    key: key.clone(),
                });
            }
            for isbn in isbns {
                match self.records.get(isbn) {
                    None => issues.push(IndexIssue::Dangling {
                        index: kind,
                        key: key.clone(),
                        isbn: isbn.clone(),
                    }),
                    Some(book) if key_of(book) != *key => issues.push(IndexIssue::Misfiled {
                        index: kind,
                        key: key.clone(),
                        isbn: isbn.clone(),
                    }),
                    Some(_) => {}
                }
            }
        }

        for book in self.records.values() {
            let filed = index
                .get(&key_of(book))
                .is_some_and(|bucket| bucket.contains(&book.isbn));
            if !filed {
                issues.push(IndexIssue::Missing {
                    index: kind,
                    isbn: book.isbn.clone(),
                });
            }
        }
    }

    /// Discard both indexes and rebuild them from the records
    pub fn rebuild_indexes(&mut self) {
        self.title_index.clear();
        self.author_index.clear();
        for book in self.records.values() {
            self.title_index.insert(book.title_key(), &book.isbn);
            self.author_index.insert(book.author_key(), &book.isbn);
        }
        debug!(records = self.records.len(), "Rebuilt indexes");
    }

    fn index(&mut self, book: &Book) {
        self.title_index.insert(book.title_key(), &book.isbn);
        self.author_index.insert(book.author_key(), &book.isbn);
    }

    fn deindex(&mut self, book: &Book) {
        self.title_index.remove(&book.title_key(), &book.isbn);
        self.author_index.remove(&book.author_key(), &book.isbn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn book(isbn: &str, title: &str, author: &str, copies: u32) -> Book {
        Book::new(isbn, title, author)
            .unwrap()
            .with_copies(copies)
            .unwrap()
    }

    fn isbns(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.isbn.clone()).collect()
    }

    fn assert_consistent(catalogue: &Catalogue) {
        assert_eq!(catalogue.index_issues(), Vec::<IndexIssue>::new());
        for b in catalogue.books() {
            assert!(b.issued_copies() <= b.total_copies());
        }
    }

    #[test]
    fn test_add_then_get() {
        let mut catalogue = Catalogue::new();
        let dune = book("111", "Dune", "Frank Herbert", 2);
        catalogue.add_book(dune.clone(), false);

        assert_eq!(catalogue.get_book("111"), Some(&dune));
        assert!(catalogue.contains("111"));
        assert!(catalogue.get_book("999").is_none());
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_add_existing_merges_copies() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("111", "Dune", "Frank Herbert", 2), false);
        assert!(catalogue.issue_book("111"));

        let merged = catalogue
            .add_book(book("111", "Other Title", "Someone Else", 3), false)
            .clone();

        assert_eq!(merged.total_copies(), 5);
        assert_eq!(merged.issued_copies(), 1);
        assert_eq!(merged.title, "Dune");
        assert_eq!(merged.author, "Frank Herbert");
        assert!(catalogue.title_index().get("other title").is_none());
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_merge_ignores_incoming_issued_count() {
        let mut catalogue = Catalogue::new();
        let original = book("111", "Dune", "Frank Herbert", 2);
        catalogue.add_book(original.clone(), false);

        let incoming = book("111", "Dune", "Frank Herbert", 4)
            .with_issued(3)
            .unwrap();
        let merged = catalogue.add_book(incoming, false).clone();

        assert_eq!(merged.total_copies(), 6);
        assert_eq!(merged.issued_copies(), 0);
        assert_eq!(merged.added_on, original.added_on);
        assert_eq!(catalogue.total_issued_count(), 0);
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_merge_caps_total_at_counter_limit() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("111", "Dune", "Frank Herbert", u32::MAX - 2), false);
        assert!(catalogue.issue_book("111"));

        let merged = catalogue
            .add_book(book("111", "Dune", "Frank Herbert", 10), false)
            .clone();

        assert_eq!(merged.total_copies(), u32::MAX);
        assert_eq!(merged.issued_copies(), 1);
        assert_eq!(catalogue.total_copies_count(), u64::from(u32::MAX));
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_stored_records_never_over_issued() {
        let mut catalogue = Catalogue::new();
        let lent_out = book("111", "Dune", "Frank Herbert", 2)
            .with_issued(2)
            .unwrap();

        // Shrinking stock below what is out on loan is refused.
        assert!(lent_out.clone().with_copies(0).is_err());

        catalogue.add_book(lent_out, true);
        assert!(!catalogue.issue_book("111"));
        assert_eq!(catalogue.get_book("111").map(Book::available_copies), Some(0));
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_add_with_overwrite_replaces_and_reindexes() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("111", "Dune", "Frank Herbert", 2), false);
        assert!(catalogue.issue_book("111"));

        let replacement = book("111", "Dune Messiah", "F. Herbert", 1);
        let stored = catalogue.add_book(replacement.clone(), true).clone();

        assert_eq!(stored, replacement);
        assert!(catalogue.title_index().get("dune").is_none());
        assert!(catalogue.author_index().get("frank herbert").is_none());
        assert!(catalogue.title_index().get("dune messiah").is_some());
        assert!(catalogue.author_index().get("f. herbert").is_some());
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_remove_unknown_leaves_store_unchanged() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("111", "Dune", "Frank Herbert", 2), false);
        let before = catalogue.clone();

        assert!(!catalogue.remove_book("999"));
        assert_eq!(catalogue, before);
        assert!(matches!(catalogue.take("999"), Err(LibraryError::NotFound(_))));
    }

    #[test]
    fn test_remove_prunes_buckets() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("111", "Dune", "Frank Herbert", 2), false);
        catalogue.add_book(book("112", "Dune", "Brian Herbert", 1), false);

        assert!(catalogue.remove_book("111"));
        assert!(catalogue.get_book("111").is_none());
        assert_eq!(
            catalogue.title_index().get("dune"),
            Some(&BTreeSet::from(["112".to_string()]))
        );
        assert!(catalogue.author_index().get("frank herbert").is_none());

        assert!(catalogue.remove_book("112"));
        assert!(catalogue.title_index().is_empty());
        assert!(catalogue.author_index().is_empty());
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_search_by_title_substring() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("111", "Dune", "Frank Herbert", 2), false);

        assert_eq!(isbns(&catalogue.search_by_title("dun")), vec!["111"]);
        assert_eq!(isbns(&catalogue.search_by_title("UNE")), vec!["111"]);
        assert!(catalogue.search_by_title("zzz").is_empty());
    }

    #[test]
    fn test_search_sorts_case_insensitively() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("3", "the odyssey", "Homer", 1), false);
        catalogue.add_book(book("1", "The Iliad", "homer", 1), false);
        catalogue.add_book(book("2", "Beowulf", "Anonymous", 1), false);

        assert_eq!(isbns(&catalogue.search_by_title("")), vec!["2", "1", "3"]);
        assert_eq!(isbns(&catalogue.search_by_title("the")), vec!["1", "3"]);
        assert_eq!(isbns(&catalogue.search_by_author("HOM")), vec!["1", "3"]);
        assert_eq!(catalogue.search_by_author("").len(), 3);
    }

    #[test]
    fn test_search_skips_dangling_isbns() {
        let mut title_index = KeyIndex::new();
        title_index.insert("ghost".to_string(), "404");
        let catalogue = Catalogue::from_parts(BTreeMap::new(), title_index, KeyIndex::new());

        assert!(catalogue.search_by_title("gho").is_empty());
    }

    #[test]
    fn test_issue_and_return_cycle() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("222", "Emma", "Jane Austen", 1), false);

        assert!(catalogue.issue_book("222"));
        assert_eq!(catalogue.get_book("222").map(Book::available_copies), Some(0));
        assert!(!catalogue.issue_book("222"));

        assert!(catalogue.return_book("222"));
        assert_eq!(catalogue.get_book("222").map(Book::available_copies), Some(1));
        assert!(!catalogue.return_book("222"));
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_circulation_error_kinds() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("222", "Emma", "Jane Austen", 1), false);

        assert!(matches!(catalogue.checkout("999"), Err(LibraryError::NotFound(_))));
        assert!(matches!(catalogue.checkin("222"), Err(LibraryError::NothingIssued(_))));
        assert_eq!(catalogue.checkout("222").unwrap().issued_copies(), 1);
        assert!(matches!(
            catalogue.checkout("222"),
            Err(LibraryError::NoCopiesAvailable(_))
        ));
        assert!(!catalogue.issue_book("999"));
        assert!(!catalogue.return_book("999"));
    }

    #[test]
    fn test_zero_copy_record_cannot_be_issued() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("333", "Ulysses", "James Joyce", 0), false);

        assert!(!catalogue.issue_book("333"));
        assert_consistent(&catalogue);
    }

    #[test]
    fn test_aggregates() {
        let mut catalogue = Catalogue::new();
        catalogue.add_book(book("1", "Dune", "Frank Herbert", 2), false);
        catalogue.add_book(book("2", "Dune", "Frank Herbert", 3), false);
        assert!(catalogue.issue_book("1"));
        assert!(catalogue.issue_book("2"));
        assert!(catalogue.issue_book("2"));

        // Two records share a title but count separately.
        assert_eq!(catalogue.total_unique_titles(), 2);
        assert_eq!(catalogue.total_copies_count(), 5);
        assert_eq!(catalogue.total_issued_count(), 3);
    }

    #[test]
    fn test_index_issues_and_rebuild() {
        let mut records = BTreeMap::new();
        let dune = book("111", "Dune", "Frank Herbert", 1);
        records.insert(dune.isbn.clone(), dune);

        let mut title_index = KeyIndex::new();
        title_index.insert("old title".to_string(), "111");
        title_index.insert("old title".to_string(), "404");
        let mut catalogue = Catalogue::from_parts(records, title_index, KeyIndex::new());

        let issues = catalogue.index_issues();
        assert!(issues.contains(&IndexIssue::Dangling {
            index: IndexKind::Title,
            key: "old title".to_string(),
            isbn: "404".to_string(),
        }));
        assert!(issues.contains(&IndexIssue::Misfiled {
            index: IndexKind::Title,
            key: "old title".to_string(),
            isbn: "111".to_string(),
        }));
        assert!(issues.contains(&IndexIssue::Missing {
            index: IndexKind::Author,
            isbn: "111".to_string(),
        }));

        catalogue.rebuild_indexes();
        assert_consistent(&catalogue);
        assert_eq!(isbns(&catalogue.search_by_title("dune")), vec!["111"]);
    }
}
