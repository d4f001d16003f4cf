//! ISBN lookup by title and author.
//!
//! Google Books returns loosely ranked candidates for an `intitle:`/`inauthor:`
//! query. Each candidate is scored by fuzzy title similarity plus fuzzy author
//! similarity; the best one is accepted only above a confidence threshold.

use std::time::Duration;

use crate::client::GoogleBooksClient;
use crate::fuzzy::partial_ratio;
use crate::types::{IndustryIdentifier, Volume, VolumesResponse};

/// Minimum combined score (out of 200) for a candidate to count as a match.
pub const DEFAULT_MATCH_THRESHOLD: u32 = 120;

/// A candidate accepted for a title/author pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsbnMatch {
    pub isbn: String,
    pub title: String,
    pub score: u32,
}

/// How often and how patiently to retry failed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given zero-based failed attempt: 1s, 2s, 4s, ...
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Build the search expression for a title/author pair.
pub fn title_author_query(title: &str, author: &str) -> String {
    format!("intitle:{} inauthor:{}", title.trim(), author.trim())
}

/// Pick the best-scoring volume, or `None` if nothing reaches `threshold`.
///
/// Ties keep the earlier candidate.
pub fn best_match<'a>(
    title: &str,
    author: &str,
    response: &'a VolumesResponse,
    threshold: u32,
) -> Option<(&'a Volume, u32)> {
    let mut best: Option<(&Volume, u32)> = None;

    for volume in &response.items {
        let info = &volume.volume_info;
        let candidate_title = info.title.as_deref().unwrap_or("");
        let score =
            partial_ratio(title, candidate_title) + partial_ratio(author, &info.joined_authors());
        log::debug!("Candidate '{}' scored {}", candidate_title, score);

        if best.is_none_or(|(_, s)| score > s) {
            best = Some((volume, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold)
}

/// ISBN-13 if present, otherwise ISBN-10.
pub fn isbn_from_identifiers(identifiers: &[IndustryIdentifier]) -> Option<String> {
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.clone())
    };
    find("ISBN_13").or_else(|| find("ISBN_10"))
}

/// Look up the ISBN for a title/author pair.
///
/// Retryable failures back off and try again up to `policy.attempts` times;
/// anything else, or exhausting the retries, is logged and reported as not
/// found.
pub fn lookup_isbn(
    client: &GoogleBooksClient,
    title: &str,
    author: &str,
    threshold: u32,
    policy: &RetryPolicy,
) -> Option<IsbnMatch> {
    let query = title_author_query(title, author);

    for attempt in 0..policy.attempts {
        match client.search(&query) {
            Ok(response) => {
                let (volume, score) = best_match(title, author, &response, threshold)?;
                let info = &volume.volume_info;
                let isbn = isbn_from_identifiers(&info.industry_identifiers)?;
                return Some(IsbnMatch {
                    isbn,
                    title: info.title.clone().unwrap_or_default(),
                    score,
                });
            }
            Err(e) if e.is_retryable() => {
                log::error!(
                    "Attempt {} for '{}' by '{}' failed: {}",
                    attempt + 1,
                    title,
                    author,
                    e
                );
                if attempt + 1 < policy.attempts {
                    std::thread::sleep(policy.backoff(attempt));
                }
            }
            Err(e) => {
                log::warn!("Lookup for '{}' by '{}' gave up: {}", title, author, e);
                return None;
            }
        }
    }
    None
}
