//! Book Catalogue
//! Mission: Hold the seeded books and the per-user reviews attached to them

pub mod models;
pub mod store;

pub use models::{Book, ReviewEntry, Reviews};
pub use store::{CatalogError, CatalogStore};
