use std::cell::Cell;
use std::time::{Duration, Instant};

use reqwest::StatusCode;

use crate::error::BooksError;
use crate::types::VolumesResponse;

const BASE_URL: &str = "https://www.googleapis.com/books/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Blocking HTTP client for the Google Books volumes API.
///
/// Consecutive API requests are spaced at least `delay` apart. Image downloads
/// go to the content CDN and are not throttled.
pub struct GoogleBooksClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    base_url: String,
    delay: Duration,
    last_request: Cell<Option<Instant>>,
}

impl GoogleBooksClient {
    pub fn new(api_key: Option<String>, delay: Duration) -> Result<Self, BooksError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("holdings/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
            delay,
            last_request: Cell::new(None),
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run a volumes search with the raw `q` expression.
    pub fn search(&self, query: &str) -> Result<VolumesResponse, BooksError> {
        let mut params = vec![("q", query.to_string())];
        if let Some(ref key) = self.api_key {
            params.push(("key", key.clone()));
        }

        self.rate_limit();
        log::debug!("Google Books query: {}", query);

        let resp = self
            .http
            .get(format!("{}/volumes", self.base_url))
            .query(&params)
            .send()?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BooksError::RateLimit);
        }
        if status.is_server_error() {
            return Err(BooksError::ServerError {
                status: status.as_u16(),
            });
        }
        if status != StatusCode::OK {
            return Err(BooksError::Status {
                status: status.as_u16(),
            });
        }

        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch raw bytes from a URL (cover thumbnails).
    pub fn download(&self, url: &str) -> Result<Vec<u8>, BooksError> {
        let resp = self.http.get(url).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }

    fn rate_limit(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }
}
