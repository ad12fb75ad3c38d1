//! Review endpoints
//!
//! Reads are public. Writes run behind the auth middleware and always act on
//! the slot of the authenticated caller, never on a username from the body.

use crate::{
    api::json_or_default,
    auth::Claims,
    catalog::CatalogStore,
    error::ApiError,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// PUT /books/review/:isbn request body
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub review: Option<String>,
}

/// GET /books/review/:isbn
pub async fn get_reviews(
    State(catalog): State<Arc<CatalogStore>>,
    Path(isbn): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let reviews = catalog.get_reviews(&isbn)?;
    Ok(Json(json!({ "reviews": reviews })))
}

/// PUT /books/review/:isbn
pub async fn put_review(
    State(catalog): State<Arc<CatalogStore>>,
    Path(isbn): Path<String>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = json_or_default(payload);
    let text = payload.review.unwrap_or_default();

    let entry = catalog.upsert_review(&isbn, &claims.username, &text)?;

    Ok(Json(json!({
        "message": "Review added/updated successfully",
        "review": entry,
    })))
}

/// DELETE /books/review/:isbn
pub async fn delete_review(
    State(catalog): State<Arc<CatalogStore>>,
    Path(isbn): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    catalog.delete_review(&isbn, &claims.username)?;
    Ok(Json(json!({ "message": "Review deleted successfully" })))
}
