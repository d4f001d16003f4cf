//! Library holdings data model, placeholder values, and field normalization.
//!
//! This crate defines the catalog entities (publishers, authors, books, copies)
//! without any database dependencies, plus the pure string-munging helpers the
//! importer uses to clean spreadsheet cells before reconciliation.

pub mod author_parser;
pub mod normalize;
pub mod types;

pub use author_parser::{AuthorKind, ParsedAuthor, parse_authors};
pub use normalize::{
    Cleaned, IsbnCheck, classify_isbn, clean_edition, clean_int, clean_text, normalize_isbn,
    normalize_publisher, normalize_title,
};
pub use types::*;
