//! Google Books client: ISBN lookup by title and author, and cover downloads.

pub mod client;
pub mod covers;
pub mod credentials;
pub mod error;
pub mod fuzzy;
pub mod lookup;
pub mod types;

pub use client::GoogleBooksClient;
pub use covers::{
    CoverInfo, CoverResult, CoverStats, DOWNLOAD_EXTENSION, FetchProgress, IsbnList, SilentFetch,
    cover_for_isbn, download_image, save_covers, unique_isbns,
};
pub use credentials::{API_KEY_ENV, ApiKey, KeySource};
pub use error::BooksError;
pub use fuzzy::partial_ratio;
pub use lookup::{
    DEFAULT_MATCH_THRESHOLD, IsbnMatch, RetryPolicy, best_match, isbn_from_identifiers,
    lookup_isbn,
};
pub use types::{ImageLinks, IndustryIdentifier, Volume, VolumeInfo, VolumesResponse};
