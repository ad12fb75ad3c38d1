//! Book Review Backend Library
//!
//! Exposes the catalogue and user stores, the token gate, the HTTP router,
//! and a client for the resulting API. The `book-review` binary wires these
//! together; tests drive the router directly.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;

pub use api::{create_router, AppState};
pub use client::{BookReviewClient, ClientError};
pub use error::ApiError;
