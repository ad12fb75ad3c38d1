use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    api::{books, reviews, AppState},
    auth::{api as auth_api, auth_middleware},
    middleware::request_logging,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    // Review writes require a verified bearer token
    let review_writes = put(reviews::put_review)
        .delete(reviews::delete_review)
        .route_layer(middleware::from_fn_with_state(
            state.auth.jwt_handler.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/books", get(books::list_books))
        .route("/books/isbn/:isbn", get(books::get_book_by_isbn))
        .route("/books/author/:author", get(books::get_books_by_author))
        .route("/books/title/:title", get(books::get_books_by_title))
        .route(
            "/books/review/:isbn",
            get(reviews::get_reviews).merge(review_writes),
        )
        .route("/register", post(auth_api::register))
        .route("/login", post(auth_api::login))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> &'static str {
    "📚 Book Review API Operational"
}
