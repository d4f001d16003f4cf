//! Parser for free-text author fields.
//!
//! Holdings spreadsheets record authors in whatever shape the cataloguer typed:
//! ```text
//! Tolkien, J.R.R.
//! Brian W. Kernighan and Dennis M. Ritchie
//! Smith, John; Doe, Jane & STI College
//! ```
//!
//! The field is split into one segment per author, and each segment becomes a
//! `(first, middle, last)` tuple with placeholders for missing parts.

use crate::types::{
    AuthorName, PLACEHOLDER_FIRST_NAME, PLACEHOLDER_LAST_NAME, PLACEHOLDER_MIDDLE_NAME,
};

/// How a segment of the author field was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorKind {
    /// A personal name split into components.
    Person,
    /// A short comma-less name (e.g. "STI College") kept whole as the last name.
    Organization,
    /// The field was empty; every component is a placeholder.
    Placeholder,
}

/// One author extracted from an author field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthor {
    pub name: AuthorName,
    pub kind: AuthorKind,
}

/// Parse an author field into one or more structured names.
///
/// Never returns an empty list: a blank field yields a single placeholder
/// author.
///
/// # Examples
///
/// ```
/// use holdings_catalog::{parse_authors, AuthorKind};
///
/// let authors = parse_authors("Kernighan, Brian W.; Dennis M. Ritchie");
/// assert_eq!(authors.len(), 2);
/// assert_eq!(authors[0].name.last, "Kernighan");
/// assert_eq!(authors[0].name.first, "Brian");
/// assert_eq!(authors[0].name.middle, "W.");
/// assert_eq!(authors[1].name.first, "Dennis");
/// assert_eq!(authors[1].name.middle, "M.");
/// assert_eq!(authors[1].name.last, "Ritchie");
///
/// let org = parse_authors("STI College");
/// assert_eq!(org[0].kind, AuthorKind::Organization);
/// assert_eq!(org[0].name.last, "STI College");
/// ```
pub fn parse_authors(field: &str) -> Vec<ParsedAuthor> {
    let parsed: Vec<ParsedAuthor> = split_authors(field)
        .iter()
        .map(|segment| parse_segment(segment))
        .collect();

    if parsed.is_empty() {
        vec![ParsedAuthor {
            name: AuthorName::placeholder(),
            kind: AuthorKind::Placeholder,
        }]
    } else {
        parsed
    }
}

// ── Internal parsing ────────────────────────────────────────────────────────

/// Split on `;`, `&`, line breaks, and the standalone word "and".
///
/// Each returned segment has its whitespace collapsed to single spaces.
fn split_authors(field: &str) -> Vec<String> {
    let mut segments = Vec::new();

    for piece in field.split([';', '&', '\n', '\r']) {
        let mut current: Vec<&str> = Vec::new();
        for word in piece.split_whitespace() {
            if word.eq_ignore_ascii_case("and") {
                push_segment(&mut segments, &current);
                current.clear();
            } else {
                current.push(word);
            }
        }
        push_segment(&mut segments, &current);
    }

    segments
}

fn push_segment(segments: &mut Vec<String>, words: &[&str]) {
    if !words.is_empty() {
        segments.push(words.join(" "));
    }
}

fn parse_segment(segment: &str) -> ParsedAuthor {
    if !segment.contains(',') && segment.split_whitespace().count() <= 2 {
        return ParsedAuthor {
            name: AuthorName::organization(segment),
            kind: AuthorKind::Organization,
        };
    }

    ParsedAuthor {
        name: parse_person(segment),
        kind: AuthorKind::Person,
    }
}

fn parse_person(segment: &str) -> AuthorName {
    let (mut first, mut middle, last) = match segment.split_once(',') {
        // "Last, First Middle..."
        Some((last, given)) => {
            let given: Vec<&str> = given.split_whitespace().collect();
            let first = given.first().copied().unwrap_or(PLACEHOLDER_FIRST_NAME);
            let middle = if given.len() > 1 {
                given[1..].join(" ")
            } else {
                PLACEHOLDER_MIDDLE_NAME.to_string()
            };
            (first.to_string(), middle, last.trim().to_string())
        }
        // "First Middle... Last"
        None => {
            let words: Vec<&str> = segment.split_whitespace().collect();
            match words.as_slice() {
                [] => (
                    PLACEHOLDER_FIRST_NAME.to_string(),
                    PLACEHOLDER_MIDDLE_NAME.to_string(),
                    PLACEHOLDER_LAST_NAME.to_string(),
                ),
                [only] => (
                    PLACEHOLDER_FIRST_NAME.to_string(),
                    PLACEHOLDER_MIDDLE_NAME.to_string(),
                    only.to_string(),
                ),
                [first, last] => (
                    first.to_string(),
                    PLACEHOLDER_MIDDLE_NAME.to_string(),
                    last.to_string(),
                ),
                [first, rest @ .., last] => (first.to_string(), rest.join(" "), last.to_string()),
            }
        }
    };

    let last = if last.is_empty() {
        PLACEHOLDER_LAST_NAME.to_string()
    } else {
        last
    };

    // A leading initial such as "J." belongs with the middle names.
    if first.chars().count() <= 2 && first.ends_with('.') {
        middle = if middle == PLACEHOLDER_MIDDLE_NAME {
            first
        } else {
            format!("{first} {middle}")
        };
        first = PLACEHOLDER_FIRST_NAME.to_string();
    }

    AuthorName { first, middle, last }
}
