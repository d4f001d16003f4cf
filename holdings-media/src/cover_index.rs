//! Index of cover image files keyed by ISBN.
//!
//! Covers are stored flat in one directory as `<isbn>.<ext>`. The index is
//! built once before an import so rows can be matched without touching the
//! filesystem again.

use std::collections::HashSet;
use std::path::Path;

use crate::MediaError;

#[derive(Debug, Clone, Default)]
pub struct CoverIndex {
    extension: String,
    stems: HashSet<String>,
}

impl CoverIndex {
    /// Scan `dir` for files with the given extension (case-insensitive).
    ///
    /// A missing directory yields an empty index.
    pub fn scan(dir: &Path, extension: &str) -> Result<Self, MediaError> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        let mut stems = HashSet::new();

        if !dir.is_dir() {
            log::warn!("Cover directory {} not found; no covers will be linked", dir.display());
            return Ok(Self { extension, stems });
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&extension));
            if !matches_ext {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.insert(stem.to_string());
            }
        }

        log::info!("Found {} .{} covers in {}", stems.len(), extension, dir.display());
        Ok(Self { extension, stems })
    }

    /// Build an index from known stems without scanning a directory.
    pub fn from_stems<I, S>(extension: &str, stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
            stems: stems.into_iter().map(Into::into).collect(),
        }
    }

    /// The stored cover reference for an ISBN, if a matching file exists.
    pub fn cover_for(&self, isbn: &str) -> Option<String> {
        self.stems
            .contains(isbn)
            .then(|| format!("{}.{}", isbn, self.extension))
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}
