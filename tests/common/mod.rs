//! Shared helpers for integration tests

use libris::{Book, Catalogue};
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

#[allow(dead_code)]
pub fn book(isbn: &str, title: &str, author: &str, copies: u32) -> Book {
    Book::new(isbn, title, author)
        .and_then(|book| book.with_copies(copies))
        .expect("valid test book")
}

/// Assert the record/index invariants hold
#[allow(dead_code)]
pub fn assert_invariants(catalogue: &Catalogue) {
    let issues = catalogue.index_issues();
    assert!(issues.is_empty(), "index issues: {:?}", issues);
    for b in catalogue.books() {
        assert!(
            b.issued_copies() <= b.total_copies(),
            "{} has {} issued of {}",
            b.isbn,
            b.issued_copies(),
            b.total_copies()
        );
    }
}
