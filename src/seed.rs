//! Sample records for a first run

use crate::catalogue::{Book, Catalogue};
use crate::Result;

const DEMO_BOOKS: [(&str, &str, &str, u32); 3] = [
    ("9780140449136", "The Odyssey", "Homer", 3),
    ("9780261103573", "The Lord of the Rings", "J. R. R. Tolkien", 5),
    ("9780131103627", "The C Programming Language", "Brian W. Kernighan", 2),
];

pub fn demo_books() -> Result<Vec<Book>> {
    DEMO_BOOKS
        .iter()
        .map(|(isbn, title, author, copies)| {
            Book::new(*isbn, *title, *author).and_then(|book| book.with_copies(*copies))
        })
        .collect()
}

/// Add the demo books when the catalogue is empty. Returns whether it did.
pub fn seed_demo(catalogue: &mut Catalogue) -> Result<bool> {
    if catalogue.total_unique_titles() != 0 {
        return Ok(false);
    }

    for book in demo_books()? {
        catalogue.add_book(book, false);
    }
    Ok(true)
}
