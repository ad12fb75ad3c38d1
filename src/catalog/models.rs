//! Catalogue Models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reviews for one book, keyed by the author's username
pub type Reviews = BTreeMap<String, String>;

/// A book in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub reviews: Reviews,
}

impl Book {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            reviews: Reviews::new(),
        }
    }

    /// Exact author match, ignoring case
    pub fn is_by(&self, author: &str) -> bool {
        self.author.to_lowercase() == author.to_lowercase()
    }

    /// Substring title match, ignoring case
    pub fn title_contains(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// A single review as returned after a write
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewEntry {
    pub username: String,
    pub review: String,
}
