//! Cover thumbnail downloads keyed by ISBN.

use std::collections::HashSet;
use std::path::Path;

use holdings_catalog::normalize_isbn;

use crate::client::GoogleBooksClient;
use crate::error::BooksError;

/// Extension covers are saved with; the thumbnails are JPEG.
pub const DOWNLOAD_EXTENSION: &str = "jpg";

/// Title and thumbnail of the first volume matching an ISBN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverInfo {
    pub title: String,
    pub thumbnail: Option<String>,
}

/// Normalized ISBNs to fetch, after cleaning a spreadsheet column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsbnList {
    /// Unique ISBNs in first-seen order.
    pub unique: Vec<String>,
    /// ISBNs that appeared more than once, sorted.
    pub duplicates: Vec<String>,
}

/// Per-ISBN result of a cover fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverResult {
    Saved { title: String },
    /// A file for this ISBN already exists.
    Skipped,
    Failed { title: Option<String> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverStats {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Progress callbacks for a cover fetch.
pub trait FetchProgress {
    fn on_start(&self, total: usize);
    fn on_result(&self, index: usize, isbn: &str, result: &CoverResult);
    fn on_complete(&self, stats: &CoverStats);
}

/// Progress reporter that does nothing.
pub struct SilentFetch;

impl FetchProgress for SilentFetch {
    fn on_start(&self, _total: usize) {}
    fn on_result(&self, _index: usize, _isbn: &str, _result: &CoverResult) {}
    fn on_complete(&self, _stats: &CoverStats) {}
}

/// Normalize each cell the way the importer does, drop anything that is not
/// an ISBN (blanks, "Not found" markers, junk), then deduplicate preserving
/// order.
///
/// The results name the cover files, so they must match the importer's keys.
pub fn unique_isbns<S: AsRef<str>>(values: &[S]) -> IsbnList {
    let mut seen = HashSet::new();
    let mut duplicates = HashSet::new();
    let mut unique = Vec::new();

    for isbn in values.iter().filter_map(|v| normalize_isbn(v.as_ref())) {
        if seen.insert(isbn.clone()) {
            unique.push(isbn);
        } else {
            duplicates.insert(isbn);
        }
    }

    let mut duplicates: Vec<String> = duplicates.into_iter().collect();
    duplicates.sort();
    IsbnList { unique, duplicates }
}

/// Query Google Books for an ISBN and return the first volume's title and
/// thumbnail URL.
pub fn cover_for_isbn(
    client: &GoogleBooksClient,
    isbn: &str,
) -> Result<Option<CoverInfo>, BooksError> {
    let response = client.search(&format!("isbn:{}", isbn))?;
    Ok(response.items.first().map(|volume| {
        let info = &volume.volume_info;
        CoverInfo {
            title: info.title.clone().unwrap_or_else(|| "Unknown Title".to_string()),
            thumbnail: info.thumbnail().map(str::to_string),
        }
    }))
}

/// Download `url` into `path`. Any failure is logged and returns `false`.
pub fn download_image(client: &GoogleBooksClient, url: Option<&str>, path: &Path) -> bool {
    let Some(url) = url else {
        return false;
    };
    let bytes = match client.download(url) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Download of {} failed: {}", url, e);
            return false;
        }
    };
    match std::fs::write(path, bytes) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not write {}: {}", path.display(), e);
            false
        }
    }
}

/// Download covers for each ISBN into `dir` as `<isbn>.jpg`.
///
/// Existing files are left alone. Per-ISBN failures are counted, never raised.
pub fn save_covers(
    client: &GoogleBooksClient,
    isbns: &[String],
    dir: &Path,
    progress: &dyn FetchProgress,
) -> Result<CoverStats, BooksError> {
    std::fs::create_dir_all(dir)?;
    let mut stats = CoverStats::default();
    progress.on_start(isbns.len());

    for (i, isbn) in isbns.iter().enumerate() {
        let path = dir.join(format!("{}.{}", isbn, DOWNLOAD_EXTENSION));

        let result = if path.exists() {
            CoverResult::Skipped
        } else {
            match cover_for_isbn(client, isbn) {
                Ok(Some(info)) => {
                    if download_image(client, info.thumbnail.as_deref(), &path) {
                        CoverResult::Saved { title: info.title }
                    } else {
                        CoverResult::Failed {
                            title: Some(info.title),
                        }
                    }
                }
                Ok(None) => CoverResult::Failed { title: None },
                Err(e) => {
                    log::warn!("Cover lookup for {} failed: {}", isbn, e);
                    CoverResult::Failed { title: None }
                }
            }
        };

        match &result {
            CoverResult::Saved { title } => {
                log::info!("Saved cover for '{}'", title);
                stats.saved += 1;
            }
            CoverResult::Skipped => stats.skipped += 1,
            CoverResult::Failed { title } => {
                log::info!(
                    "Failed to save cover for '{}'",
                    title.as_deref().unwrap_or("Title not found")
                );
                stats.failed += 1;
            }
        }
        progress.on_result(i, isbn, &result);
    }

    progress.on_complete(&stats);
    Ok(stats)
}
