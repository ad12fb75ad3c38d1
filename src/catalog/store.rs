//! Catalogue Storage
//! Mission: Serve book lookups and keep one review per user per book

use crate::catalog::models::{Book, ReviewEntry, Reviews};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

/// Catalogue lookup and review errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Book not found")]
    BookNotFound,
    #[error("No books found by this author")]
    NoBooksByAuthor,
    #[error("No books found with this title")]
    NoBooksWithTitle,
    #[error("Review text required")]
    EmptyReview,
    #[error("No review found for this user")]
    ReviewNotFound,
}

/// In-memory catalogue.
///
/// Books are fixed at construction and kept in insertion order. Only the
/// review maps change afterwards, and every change happens under the write
/// lock so check-then-write sequences observe a consistent prior state.
pub struct CatalogStore {
    books: RwLock<Vec<Book>>,
}

impl CatalogStore {
    /// Create a catalogue holding exactly `books`
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Create the catalogue with the five seeded titles (ISBN001..ISBN005)
    pub fn seeded() -> Self {
        let store = Self::new(seed_books());
        info!("📚 Catalogue seeded with {} books", store.len());
        store
    }

    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }

    /// All books in insertion order
    pub fn list_books(&self) -> Vec<Book> {
        self.books.read().clone()
    }

    pub fn get_by_isbn(&self, isbn: &str) -> Result<Book, CatalogError> {
        self.books
            .read()
            .iter()
            .find(|b| b.isbn == isbn)
            .cloned()
            .ok_or(CatalogError::BookNotFound)
    }

    /// Books whose author equals `author`, ignoring case
    pub fn find_by_author(&self, author: &str) -> Result<Vec<Book>, CatalogError> {
        let matches: Vec<Book> = self
            .books
            .read()
            .iter()
            .filter(|b| b.is_by(author))
            .cloned()
            .collect();

        debug!("Author search '{}' matched {} books", author, matches.len());

        if matches.is_empty() {
            return Err(CatalogError::NoBooksByAuthor);
        }
        Ok(matches)
    }

    /// Books whose title contains `title`, ignoring case
    pub fn find_by_title(&self, title: &str) -> Result<Vec<Book>, CatalogError> {
        let matches: Vec<Book> = self
            .books
            .read()
            .iter()
            .filter(|b| b.title_contains(title))
            .cloned()
            .collect();

        debug!("Title search '{}' matched {} books", title, matches.len());

        if matches.is_empty() {
            return Err(CatalogError::NoBooksWithTitle);
        }
        Ok(matches)
    }

    pub fn get_reviews(&self, isbn: &str) -> Result<Reviews, CatalogError> {
        self.get_by_isbn(isbn).map(|b| b.reviews)
    }

    /// Insert or overwrite `username`'s review of `isbn`
    pub fn upsert_review(
        &self,
        isbn: &str,
        username: &str,
        text: &str,
    ) -> Result<ReviewEntry, CatalogError> {
        if text.is_empty() {
            return Err(CatalogError::EmptyReview);
        }

        let mut books = self.books.write();
        let book = books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or(CatalogError::BookNotFound)?;

        let previous = book
            .reviews
            .insert(username.to_string(), text.to_string());

        info!(
            "✍️  Review {} for {} by {}",
            if previous.is_some() { "updated" } else { "added" },
            isbn,
            username
        );

        Ok(ReviewEntry {
            username: username.to_string(),
            review: text.to_string(),
        })
    }

    /// Remove `username`'s review of `isbn`
    pub fn delete_review(&self, isbn: &str, username: &str) -> Result<(), CatalogError> {
        let mut books = self.books.write();
        let book = books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or(CatalogError::BookNotFound)?;

        if book.reviews.remove(username).is_none() {
            return Err(CatalogError::ReviewNotFound);
        }

        info!("🗑️  Review deleted for {} by {}", isbn, username);
        Ok(())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// The fixed starting catalogue
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new("ISBN001", "The Great Gatsby", "F. Scott Fitzgerald"),
        Book::new("ISBN002", "To Kill a Mockingbird", "Harper Lee"),
        Book::new("ISBN003", "1984", "George Orwell"),
        Book::new("ISBN004", "Pride and Prejudice", "Jane Austen"),
        Book::new("ISBN005", "Animal Farm", "George Orwell"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_books_in_order() {
        let store = CatalogStore::seeded();
        let isbns: Vec<String> = store.list_books().into_iter().map(|b| b.isbn).collect();

        assert_eq!(
            isbns,
            vec!["ISBN001", "ISBN002", "ISBN003", "ISBN004", "ISBN005"]
        );
    }

    #[test]
    fn test_every_seeded_isbn_resolves() {
        let store = CatalogStore::seeded();

        for book in seed_books() {
            let found = store.get_by_isbn(&book.isbn).unwrap();
            assert_eq!(found.isbn, book.isbn);
        }

        assert_eq!(
            store.get_by_isbn("ISBN999"),
            Err(CatalogError::BookNotFound)
        );
    }

    #[test]
    fn test_find_by_author_ignores_case() {
        let store = CatalogStore::seeded();

        for query in ["george orwell", "George Orwell", "GEORGE ORWELL"] {
            let books = store.find_by_author(query).unwrap();
            let isbns: Vec<&str> = books.iter().map(|b| b.isbn.as_str()).collect();
            assert_eq!(isbns, vec!["ISBN003", "ISBN005"]);
        }

        // Exact match only
        assert_eq!(
            store.find_by_author("Orwell"),
            Err(CatalogError::NoBooksByAuthor)
        );
    }

    #[test]
    fn test_find_by_title_substring() {
        let store = CatalogStore::seeded();

        let books = store.find_by_title("1984").unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "ISBN003");

        let books = store.find_by_title("the").unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "The Great Gatsby");

        let books = store.find_by_title("A").unwrap();
        assert!(books.len() > 1);

        assert_eq!(
            store.find_by_title("Moby Dick"),
            Err(CatalogError::NoBooksWithTitle)
        );
    }

    #[test]
    fn test_upsert_overwrites_own_review() {
        let store = CatalogStore::seeded();

        store.upsert_review("ISBN001", "alice", "Good").unwrap();
        let entry = store.upsert_review("ISBN001", "alice", "Great read").unwrap();
        assert_eq!(entry.review, "Great read");

        let reviews = store.get_reviews("ISBN001").unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews.get("alice").map(String::as_str), Some("Great read"));
    }

    #[test]
    fn test_reviews_are_kept_per_user() {
        let store = CatalogStore::seeded();

        store.upsert_review("ISBN002", "alice", "Moving").unwrap();
        store.upsert_review("ISBN002", "bob", "Slow start").unwrap();

        let reviews = store.get_reviews("ISBN002").unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews["alice"], "Moving");
        assert_eq!(reviews["bob"], "Slow start");
    }

    #[test]
    fn test_upsert_rejects_empty_text_and_unknown_isbn() {
        let store = CatalogStore::seeded();

        assert_eq!(
            store.upsert_review("ISBN001", "alice", ""),
            Err(CatalogError::EmptyReview)
        );
        assert_eq!(
            store.upsert_review("NOPE", "alice", "text"),
            Err(CatalogError::BookNotFound)
        );

        // Nothing was written anywhere
        assert!(store.list_books().iter().all(|b| b.reviews.is_empty()));
    }

    #[test]
    fn test_delete_round_trip_restores_reviews() {
        let store = CatalogStore::seeded();
        store.upsert_review("ISBN003", "bob", "Chilling").unwrap();
        let before = store.get_reviews("ISBN003").unwrap();

        store.upsert_review("ISBN003", "alice", "Prophetic").unwrap();
        store.delete_review("ISBN003", "alice").unwrap();

        assert_eq!(store.get_reviews("ISBN003").unwrap(), before);
    }

    #[test]
    fn test_delete_missing_review() {
        let store = CatalogStore::seeded();

        assert_eq!(
            store.delete_review("ISBN001", "alice"),
            Err(CatalogError::ReviewNotFound)
        );
        assert_eq!(
            store.delete_review("ISBN404", "alice"),
            Err(CatalogError::BookNotFound)
        );
    }

    #[test]
    fn test_delete_only_removes_callers_entry() {
        let store = CatalogStore::seeded();
        store.upsert_review("ISBN005", "alice", "Sharp").unwrap();
        store.upsert_review("ISBN005", "bob", "Short").unwrap();

        store.delete_review("ISBN005", "bob").unwrap();

        let reviews = store.get_reviews("ISBN005").unwrap();
        assert!(reviews.contains_key("alice"));
        assert!(!reviews.contains_key("bob"));
    }
}
