//! Cleaning one spreadsheet row into catalog-ready values.

use holdings_catalog::{
    AuthorKind, AuthorName, Cleaned, IsbnCheck, PLACEHOLDER_CALL_NO, PLACEHOLDER_PUBLISHER,
    PLACEHOLDER_TITLE, classify_isbn, clean_edition, clean_int, clean_text, normalize_publisher,
    normalize_title, parse_authors, placeholder_accession,
};

use crate::audit::RunLog;
use crate::sheet::SheetRow;

/// A row after every field has been cleaned. Missing required values hold
/// placeholders; missing optional values are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    /// One-based data row number.
    pub number: usize,
    pub title: String,
    pub publisher: String,
    pub authors: Vec<AuthorName>,
    pub call_no: String,
    pub accession: String,
    pub edition: Option<String>,
    pub pages: i64,
    pub isbn: Option<String>,
}

impl NormalizedRow {
    /// Books are only matched against existing records when both title and
    /// publisher are real values.
    pub fn is_matchable(&self) -> bool {
        self.title != PLACEHOLDER_TITLE && self.publisher != PLACEHOLDER_PUBLISHER
    }
}

/// Clean every field of `row`, recording each change in `log`.
pub fn normalize_row(row: &SheetRow<'_>, log: &mut RunLog) -> NormalizedRow {
    let n = row.number();

    let title = {
        let raw = row.get("TITLE");
        match clean_text(raw, PLACEHOLDER_TITLE) {
            Cleaned::Defaulted(v) => {
                log.substituted(
                    n,
                    format!(
                        "Field: 'TITLE' | Empty value replaced with placeholder: '{}'",
                        v
                    ),
                );
                v
            }
            cleaned => {
                let title = normalize_title(cleaned.value());
                if title != raw {
                    log.normalized(
                        n,
                        format!("Field: 'TITLE' | Cleaned value: '{}' -> '{}'", raw, title),
                    );
                }
                title
            }
        }
    };

    let publisher = {
        let raw = row.get("PUBLISHER");
        match clean_text(raw, PLACEHOLDER_PUBLISHER) {
            Cleaned::Defaulted(v) => {
                log.substituted(
                    n,
                    format!(
                        "Field: 'PUBLISHER' | Empty value replaced with placeholder: '{}'",
                        v
                    ),
                );
                v
            }
            cleaned => {
                let normalized = normalize_publisher(cleaned.value());
                if normalized == PLACEHOLDER_PUBLISHER {
                    log.substituted(
                        n,
                        format!(
                            "Publisher '{}' became empty after normalization, using placeholder",
                            raw
                        ),
                    );
                } else if normalized != raw.trim().to_lowercase() {
                    log.normalized(
                        n,
                        format!("Publisher normalized: '{}' -> '{}'", raw, normalized),
                    );
                }
                normalized
            }
        }
    };

    let authors = parse_authors(row.get("AUTHOR"))
        .into_iter()
        .map(|parsed| {
            match parsed.kind {
                AuthorKind::Placeholder => log.substituted(
                    n,
                    "Author: '' | Empty author field, using placeholder values",
                ),
                AuthorKind::Organization => log.normalized(
                    n,
                    format!(
                        "Author: '{}' | Treated as organization name",
                        parsed.name.last
                    ),
                ),
                AuthorKind::Person => {}
            }
            parsed.name
        })
        .collect();

    let call_no = text_field(row, "CALL NO.", PLACEHOLDER_CALL_NO, log);
    let accession = text_field(row, "ACCESSION", &placeholder_accession(n), log);

    let edition = {
        let raw = row.get("ED./VOL.");
        let edition = clean_edition(raw);
        if let Some(e) = edition.as_deref().filter(|e| *e != raw) {
            log.normalized(
                n,
                format!("Field: 'ED./VOL.' | Cleaned edition: '{}' -> '{}'", raw, e),
            );
        }
        edition
    };

    let pages = {
        let raw = row.get("PAGES");
        match clean_int(raw, 0) {
            Cleaned::Defaulted(v) => {
                log.warning(
                    n,
                    format!(
                        "PAGES: '{}' | Could not extract a number, using default {}",
                        raw, v
                    ),
                );
                v
            }
            Cleaned::Modified(v) => {
                log.normalized(n, format!("PAGES: '{}' -> {}", raw, v));
                v
            }
            Cleaned::Unchanged(v) => v,
        }
    };

    let isbn = {
        let raw = row.get("ISBN");
        match classify_isbn(raw) {
            IsbnCheck::Missing => None,
            IsbnCheck::Invalid { length } => {
                log.warning(
                    n,
                    format!(
                        "ISBN: Invalid format for '{}' ({} characters), setting to NULL",
                        raw, length
                    ),
                );
                None
            }
            IsbnCheck::Valid { isbn, changed } => {
                if changed {
                    log.normalized(
                        n,
                        format!("ISBN normalized: '{}' -> '{}'", raw, isbn),
                    );
                }
                Some(isbn)
            }
        }
    };

    NormalizedRow {
        number: n,
        title,
        publisher,
        authors,
        call_no,
        accession,
        edition,
        pages,
        isbn,
    }
}

fn text_field(row: &SheetRow<'_>, column: &str, placeholder: &str, log: &mut RunLog) -> String {
    let n = row.number();
    let raw = row.get(column);
    match clean_text(raw, placeholder) {
        Cleaned::Defaulted(v) => {
            log.substituted(
                n,
                format!(
                    "Field: '{}' | Empty value replaced with placeholder: '{}'",
                    column, v
                ),
            );
            v
        }
        Cleaned::Modified(v) => {
            log.normalized(
                n,
                format!(
                    "Field: '{}' | Cleaned value: '{}' -> '{}'",
                    column, raw, v
                ),
            );
            v
        }
        Cleaned::Unchanged(v) => v,
    }
}
