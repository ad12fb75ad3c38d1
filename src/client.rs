//! Book Review API Client
//! Mission: One async call per remote operation, with typed results

use crate::{
    auth::models::{CredentialsRequest, LoginResponse},
    catalog::{Book, ReviewEntry, Reviews},
};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Client-side failures
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    /// Status code for server-side rejections
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BooksBody {
    books: Vec<Book>,
}

#[derive(Debug, Deserialize)]
struct BookBody {
    book: Book,
}

#[derive(Debug, Deserialize)]
struct ReviewsBody {
    reviews: Reviews,
}

#[derive(Debug, Deserialize)]
struct ReviewBody {
    review: ReviewEntry,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ReviewPayload<'a> {
    review: &'a str,
}

/// HTTP client for the book review API
#[derive(Clone)]
pub struct BookReviewClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl BookReviewClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Self::with_http_client(http, base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Use `token` as the bearer credential for review writes
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let body: BooksBody = self.send(self.request(Method::GET, &["books"])?).await?;
        Ok(body.books)
    }

    pub async fn book_by_isbn(&self, isbn: &str) -> Result<Book, ClientError> {
        let body: BookBody = self
            .send(self.request(Method::GET, &["books", "isbn", isbn])?)
            .await?;
        Ok(body.book)
    }

    pub async fn books_by_author(&self, author: &str) -> Result<Vec<Book>, ClientError> {
        let body: BooksBody = self
            .send(self.request(Method::GET, &["books", "author", author])?)
            .await?;
        Ok(body.books)
    }

    pub async fn books_by_title(&self, title: &str) -> Result<Vec<Book>, ClientError> {
        let body: BooksBody = self
            .send(self.request(Method::GET, &["books", "title", title])?)
            .await?;
        Ok(body.books)
    }

    pub async fn reviews(&self, isbn: &str) -> Result<Reviews, ClientError> {
        let body: ReviewsBody = self
            .send(self.request(Method::GET, &["books", "review", isbn])?)
            .await?;
        Ok(body.reviews)
    }

    /// Register an account, returning the server's confirmation message
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let req = self
            .request(Method::POST, &["register"])?
            .json(&CredentialsRequest::new(username, password));
        let body: MessageBody = self.send(req).await?;
        Ok(body.message)
    }

    /// Log in and keep the issued token on this client
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let req = self
            .request(Method::POST, &["login"])?
            .json(&CredentialsRequest::new(username, password));
        let body: LoginResponse = self.send(req).await?;
        self.token = Some(body.token.clone());
        Ok(body)
    }

    pub async fn put_review(&self, isbn: &str, text: &str) -> Result<ReviewEntry, ClientError> {
        let req = self
            .authorized(self.request(Method::PUT, &["books", "review", isbn])?)
            .json(&ReviewPayload { review: text });
        let body: ReviewBody = self.send(req).await?;
        Ok(body.review)
    }

    pub async fn delete_review(&self, isbn: &str) -> Result<String, ClientError> {
        let req = self.authorized(self.request(Method::DELETE, &["books", "review", isbn])?);
        let body: MessageBody = self.send(req).await?;
        Ok(body.message)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.url(segments)?;
        debug!("{} {}", method, url);
        Ok(self.http.request(method, url))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp
                .json::<MessageBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
            return Err(ClientError::Status { status, message });
        }

        Ok(resp.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_are_encoded() {
        let client = BookReviewClient::new("http://localhost:5000").unwrap();
        let url = client.url(&["books", "author", "George Orwell"]).unwrap();

        assert_eq!(url.as_str(), "http://localhost:5000/books/author/George%20Orwell");
    }

    #[test]
    fn test_base_path_is_preserved() {
        let client = BookReviewClient::new("http://localhost:5000/api/").unwrap();
        let url = client.url(&["books"]).unwrap();

        assert_eq!(url.as_str(), "http://localhost:5000/api/books");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            BookReviewClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            BookReviewClient::new("mailto:someone@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_token_is_kept() {
        let client = BookReviewClient::new("http://localhost:5000")
            .unwrap()
            .with_token("abc");
        assert_eq!(client.token(), Some("abc"));
    }
}
