//! SQLite persistence layer for the holdings catalog.
//!
//! Provides schema creation, entity operations used by the importer, and
//! read queries backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, find_author_by_first_last, find_author_exact, find_book_by_isbn,
    find_book_by_title_publisher_edition, find_publisher_by_name, insert_author, insert_book,
    insert_book_copy, insert_import_run, insert_publisher, link_author, update_author_middle,
};
pub use queries::{
    CatalogStats, authors_for_book, catalog_stats, copies_for_book, get_book, list_import_runs,
};
pub use schema::{SchemaError, open_database, open_memory};
