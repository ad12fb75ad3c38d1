//! Catalogue read endpoints

use crate::{catalog::CatalogStore, error::ApiError};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /books
pub async fn list_books(State(catalog): State<Arc<CatalogStore>>) -> Json<Value> {
    Json(json!({ "books": catalog.list_books() }))
}

/// GET /books/isbn/:isbn
pub async fn get_book_by_isbn(
    State(catalog): State<Arc<CatalogStore>>,
    Path(isbn): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let book = catalog.get_by_isbn(&isbn)?;
    Ok(Json(json!({ "book": book })))
}

/// GET /books/author/:author
pub async fn get_books_by_author(
    State(catalog): State<Arc<CatalogStore>>,
    Path(author): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let books = catalog.find_by_author(&author)?;
    Ok(Json(json!({ "books": books })))
}

/// GET /books/title/:title
pub async fn get_books_by_title(
    State(catalog): State<Arc<CatalogStore>>,
    Path(title): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let books = catalog.find_by_title(&title)?;
    Ok(Json(json!({ "books": books })))
}
