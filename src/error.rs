//! API Errors
//!
//! Every failure is converted at the handler boundary into a status code and a
//! `{"message": ...}` body. Nothing is retried and nothing here is fatal.

use crate::{auth::user_store::UserStoreError, catalog::CatalogError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Handler-level error type that maps to HTTP responses
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or empty required field
    #[error("{0}")]
    Validation(String),

    /// Resource already exists
    #[error("{0}")]
    Conflict(String),

    /// Credentials did not match
    #[error("{0}")]
    InvalidCredentials(String),

    /// Unknown book, empty search, or no such review
    #[error("{0}")]
    NotFound(String),

    /// Failure outside the request's control, details are logged not returned
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EmptyReview => ApiError::Validation(err.to_string()),
            CatalogError::BookNotFound
            | CatalogError::NoBooksByAuthor
            | CatalogError::NoBooksWithTitle
            | CatalogError::ReviewNotFound => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::MissingCredentials => ApiError::Validation(err.to_string()),
            UserStoreError::UserExists => ApiError::Conflict(err.to_string()),
            UserStoreError::InvalidCredentials => ApiError::InvalidCredentials(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Internal error: {:#}", err);
        ApiError::Internal("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
