//! Book Review Client
//! Mission: Walk every API endpoint against a running server and report each step

use anyhow::{bail, Result};
use book_review_backend::client::{BookReviewClient, ClientError};
use clap::Parser;
use reqwest::StatusCode;
use std::fmt::Debug;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "book-review-client", about = "Exercise the book review API end to end")]
struct Args {
    /// Server base URL
    #[arg(long, env = "BOOK_REVIEW_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Account used for the authenticated steps
    #[arg(long, default_value = "testuser")]
    username: String,

    #[arg(long, default_value = "testpass123")]
    password: String,

    /// Book the review steps operate on
    #[arg(long, default_value = "ISBN001")]
    isbn: String,

    #[arg(long, default_value = "Great read")]
    review: String,
}

/// Tally of step outcomes
#[derive(Default)]
struct Report {
    passed: usize,
    failed: usize,
}

impl Report {
    fn record<T: Debug>(&mut self, step: &str, result: Result<T, ClientError>) -> Option<T> {
        match result {
            Ok(value) => {
                info!("✓ {}: {:?}", step, value);
                self.passed += 1;
                Some(value)
            }
            Err(e) => {
                error!("✗ {}: {}", step, e);
                self.failed += 1;
                None
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_review_client=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut client = BookReviewClient::new(&args.base_url)?;
    let mut report = Report::default();

    info!("=== Book Review API walk against {} ===", args.base_url);

    report.record("Get all books", client.list_books().await);
    report.record("Get book by ISBN", client.book_by_isbn(&args.isbn).await);
    report.record("Get books by author", client.books_by_author("George Orwell").await);
    report.record("Get books by title", client.books_by_title("1984").await);
    report.record("Get book reviews", client.reviews(&args.isbn).await);

    // An account left over from an earlier run is fine
    let registered = match client.register(&args.username, &args.password).await {
        Err(ClientError::Status { status, .. }) if status == StatusCode::CONFLICT => {
            Ok("User already exists".to_string())
        }
        other => other,
    };
    report.record("Register user", registered);

    let logged_in = report
        .record(
            "Login",
            client
                .login(&args.username, &args.password)
                .await
                .map(|r| r.username),
        )
        .is_some();

    if logged_in {
        report.record(
            "Add/modify review",
            client.put_review(&args.isbn, &args.review).await,
        );
        report.record("Reviews after update", client.reviews(&args.isbn).await);
        report.record("Delete review", client.delete_review(&args.isbn).await);
    }

    info!(
        "=== Done: {} passed, {} failed ===",
        report.passed, report.failed
    );

    if report.failed > 0 {
        bail!("{} step(s) failed", report.failed);
    }
    Ok(())
}
