//! Per-field cleaning for spreadsheet cells.
//!
//! Every function here is total: malformed input falls back to a placeholder
//! or default rather than failing, and the return value tells the caller
//! whether a fallback happened so it can be logged at the right level.

use crate::types::PLACEHOLDER_PUBLISHER;

/// Cell values that mean "no ISBN" rather than a malformed one.
const ISBN_MISSING_MARKERS: &[&str] = &["not found", "none", "nan", "n/a", ""];

/// Edition values treated as absent.
const EDITION_MISSING_MARKERS: &[&str] = &["none", "n/a", "na", "not specified", ""];

/// Corporate suffixes dropped from publisher names.
const PUBLISHER_DROPPED: &[&str] = &["inc", "incorporated", "llc", "ltd", "limited"];

/// Whole-word abbreviations applied to publisher names.
const PUBLISHER_ABBREVIATIONS: &[(&str, &str)] = &[
    ("publishing", "publish"),
    ("company", "co"),
    ("corporation", "corp"),
];

/// Result of cleaning a value, recording whether it was altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleaned<T> {
    /// The input was already clean.
    Unchanged(T),
    /// The input was usable but had to be tidied (trimmed, digits extracted).
    Modified(T),
    /// The input was unusable and a default/placeholder was substituted.
    Defaulted(T),
}

impl<T> Cleaned<T> {
    pub fn value(&self) -> &T {
        match self {
            Cleaned::Unchanged(v) | Cleaned::Modified(v) | Cleaned::Defaulted(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Cleaned::Unchanged(v) | Cleaned::Modified(v) | Cleaned::Defaulted(v) => v,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Cleaned::Defaulted(_))
    }
}

// ── ISBN ────────────────────────────────────────────────────────────────────

/// Outcome of inspecting a raw ISBN cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsbnCheck {
    /// Empty cell or an explicit "not found"-style marker.
    Missing,
    /// Something was there, but it does not reduce to 10 or 13 characters.
    Invalid { length: usize },
    /// A usable ISBN. `changed` is set when separators or case were altered.
    Valid { isbn: String, changed: bool },
}

/// Classify a raw ISBN cell.
///
/// Keeps only digits and `X`, uppercased, and accepts the result only when it
/// is exactly 10 or 13 characters long.
pub fn classify_isbn(raw: &str) -> IsbnCheck {
    let trimmed = raw.trim();
    if ISBN_MISSING_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        return IsbnCheck::Missing;
    }

    let isbn: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    match isbn.len() {
        10 | 13 => IsbnCheck::Valid {
            changed: isbn != trimmed,
            isbn,
        },
        length => IsbnCheck::Invalid { length },
    }
}

/// Normalize an ISBN, returning `None` when it is missing or malformed.
///
/// ```
/// use holdings_catalog::normalize_isbn;
///
/// assert_eq!(normalize_isbn("978-0-13-110362-7"), Some("9780131103627".to_string()));
/// assert_eq!(normalize_isbn("0-306-40615-x"), Some("030640615X".to_string()));
/// assert_eq!(normalize_isbn("12345"), None);
/// ```
pub fn normalize_isbn(raw: &str) -> Option<String> {
    match classify_isbn(raw) {
        IsbnCheck::Valid { isbn, .. } => Some(isbn),
        IsbnCheck::Missing | IsbnCheck::Invalid { .. } => None,
    }
}

// ── Publisher ───────────────────────────────────────────────────────────────

/// Normalize a publisher name for deduplication.
///
/// Lowercases, turns punctuation into spaces, collapses whitespace, drops
/// corporate suffixes, and abbreviates common words. An empty result maps to
/// [`PLACEHOLDER_PUBLISHER`].
///
/// ```
/// use holdings_catalog::normalize_publisher;
///
/// assert_eq!(normalize_publisher("McGraw-Hill Publishing Company, Inc."), "mcgraw hill publish co");
/// assert_eq!(normalize_publisher("  "), "No Publisher");
/// ```
pub fn normalize_publisher(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .to_lowercase();

    let words: Vec<&str> = spaced
        .split_whitespace()
        .filter(|w| !PUBLISHER_DROPPED.contains(w))
        .map(|w| {
            PUBLISHER_ABBREVIATIONS
                .iter()
                .find(|(long, _)| *long == w)
                .map_or(w, |(_, short)| *short)
        })
        .collect();

    if words.is_empty() {
        PLACEHOLDER_PUBLISHER.to_string()
    } else {
        words.join(" ")
    }
}

// ── Integers ────────────────────────────────────────────────────────────────

/// Parse an integer cell.
///
/// Falls back to the first run of digits in the text ("245 p." → 245), and
/// to `default` when there are none.
pub fn clean_int(raw: &str, default: i64) -> Cleaned<i64> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Cleaned::Unchanged(n);
    }

    let digits: String = trimmed
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<i64>() {
        Ok(n) => Cleaned::Modified(n),
        Err(_) => Cleaned::Defaulted(default),
    }
}

// ── Text ────────────────────────────────────────────────────────────────────

/// Trim a text cell, substituting `placeholder` when it is empty.
pub fn clean_text(raw: &str, placeholder: &str) -> Cleaned<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Cleaned::Defaulted(placeholder.to_string())
    } else if trimmed.len() != raw.len() {
        Cleaned::Modified(trimmed.to_string())
    } else {
        Cleaned::Unchanged(trimmed.to_string())
    }
}

/// Trim an edition/volume cell. Empty cells and "n/a"-style markers are absent.
pub fn clean_edition(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if EDITION_MISSING_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collapse internal runs of whitespace in a title.
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}
