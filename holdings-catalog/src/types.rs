//! Data model types for the holdings catalog.
//!
//! These types mirror the persistent schema: publishers, authors, books,
//! book copies, author links, and import tracking.

use serde::{Deserialize, Serialize};

// ── Placeholders ────────────────────────────────────────────────────────────

pub const PLACEHOLDER_PUBLISHER: &str = "No Publisher";
pub const PLACEHOLDER_FIRST_NAME: &str = "No First Name";
pub const PLACEHOLDER_MIDDLE_NAME: &str = "No Middle Name";
pub const PLACEHOLDER_LAST_NAME: &str = "No Last Name";
pub const PLACEHOLDER_TITLE: &str = "No Title";
pub const PLACEHOLDER_CALL_NO: &str = "No Call Number";

/// Accession numbers identify a single copy, so the placeholder is made
/// unique per source row.
pub fn placeholder_accession(row_number: usize) -> String {
    format!("No Accession_{row_number}")
}

/// Status every imported copy starts with.
pub const COPY_STATUS_AVAILABLE: &str = "Available";

// ── Authors ─────────────────────────────────────────────────────────────────

/// A structured author name. Missing components hold placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorName {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl AuthorName {
    pub fn new(
        first: impl Into<String>,
        middle: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            middle: middle.into(),
            last: last.into(),
        }
    }

    /// The all-placeholder author used when a row has no usable author text.
    pub fn placeholder() -> Self {
        Self::new(
            PLACEHOLDER_FIRST_NAME,
            PLACEHOLDER_MIDDLE_NAME,
            PLACEHOLDER_LAST_NAME,
        )
    }

    /// An organization stored under its full name as the last name.
    pub fn organization(name: impl Into<String>) -> Self {
        Self::new(PLACEHOLDER_FIRST_NAME, PLACEHOLDER_MIDDLE_NAME, name)
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.first, self.middle, self.last)
    }
}

/// True if a stored middle name carries no real information.
pub fn is_placeholder_middle(middle: &str) -> bool {
    let middle = middle.trim();
    middle.is_empty()
        || middle.eq_ignore_ascii_case("n/a")
        || middle.eq_ignore_ascii_case(PLACEHOLDER_MIDDLE_NAME)
}

/// A persisted author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
}

// ── Publishers ──────────────────────────────────────────────────────────────

/// A persisted publisher, keyed by its normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

// ── Books ───────────────────────────────────────────────────────────────────

/// A bibliographic record. Absent optional fields are stored as NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub publisher_id: i64,
    pub pages: i64,
    pub isbn: Option<String>,
    pub cover_image: Option<String>,
    pub edition: Option<String>,
}

/// Field values for a book about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub publisher_id: i64,
    pub pages: i64,
    pub isbn: Option<String>,
    pub cover_image: Option<String>,
    pub edition: Option<String>,
}

/// One physical holding of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    pub id: i64,
    pub book_id: i64,
    pub accession_no: String,
    pub call_no: String,
    pub edition: Option<String>,
    pub status: String,
}

/// Field values for a copy about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookCopy {
    pub book_id: i64,
    pub accession_no: String,
    pub call_no: String,
    pub edition: Option<String>,
}

/// An author attached to a book, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAuthor {
    pub author: Author,
    pub author_order: i64,
}

// ── Import tracking ─────────────────────────────────────────────────────────

/// One recorded import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRun {
    pub id: i64,
    pub source_name: String,
    pub started_at: String,
    pub finished_at: String,
    pub total_rows: i64,
    pub success_count: i64,
    pub error_count: i64,
    pub dry_run: bool,
}
