/// Errors that can occur while talking to Google Books.
#[derive(Debug, thiserror::Error)]
pub enum BooksError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by Google Books (HTTP 429)")]
    RateLimit,

    #[error("Server error (HTTP {status})")]
    ServerError { status: u16 },

    #[error("Unexpected response (HTTP {status})")]
    Status { status: u16 },

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BooksError {
    /// Transport failures, throttling and server-side errors are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BooksError::Http(_) | BooksError::RateLimit | BooksError::ServerError { .. }
        )
    }
}
