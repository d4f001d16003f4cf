//! Lookup and insert operations for all catalog entity types.
//!
//! These are the primitives the importer's find-or-create logic is built on.
//! None of them open transactions; callers decide the unit of work.

use holdings_catalog::types::*;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Publisher Operations ────────────────────────────────────────────────────

/// Find a publisher by its normalized name (exact match).
pub fn find_publisher_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT publisher_id FROM publishers WHERE name = ?1 LIMIT 1")?;
    optional(stmt.query_row(params![name], |row| row.get::<_, i64>(0)))
}

/// Insert a new publisher. Returns the generated ID.
pub fn insert_publisher(conn: &Connection, name: &str) -> Result<i64, OperationError> {
    conn.execute("INSERT INTO publishers (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

// ── Author Operations ───────────────────────────────────────────────────────

/// Find an author matching all three name components.
pub fn find_author_exact(
    conn: &Connection,
    name: &AuthorName,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT author_id FROM authors
         WHERE first_name = ?1 AND middle_name = ?2 AND last_name = ?3
         ORDER BY author_id LIMIT 1",
    )?;
    optional(stmt.query_row(params![name.first, name.middle, name.last], |row| {
        row.get::<_, i64>(0)
    }))
}

/// Find an author by first and last name, ignoring the middle name.
pub fn find_author_by_first_last(
    conn: &Connection,
    first: &str,
    last: &str,
) -> Result<Option<Author>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT author_id, first_name, middle_name, last_name FROM authors
         WHERE first_name = ?1 AND last_name = ?2
         ORDER BY author_id LIMIT 1",
    )?;
    optional(stmt.query_row(params![first, last], |row| {
        Ok(Author {
            id: row.get(0)?,
            first_name: row.get(1)?,
            middle_name: row.get(2)?,
            last_name: row.get(3)?,
        })
    }))
}

/// Replace an author's stored middle name.
pub fn update_author_middle(
    conn: &Connection,
    author_id: i64,
    middle_name: &str,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE authors SET middle_name = ?2 WHERE author_id = ?1",
        params![author_id, middle_name],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "author".to_string(),
            id: author_id.to_string(),
        });
    }
    Ok(())
}

/// Insert a new author. Returns the generated ID.
pub fn insert_author(conn: &Connection, name: &AuthorName) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO authors (first_name, middle_name, last_name) VALUES (?1, ?2, ?3)",
        params![name.first, name.middle, name.last],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Book Operations ─────────────────────────────────────────────────────────

const BOOK_COLUMNS: &str = "book_id, title, publisher_id, pages, isbn, cover_image, edition";

/// Find the oldest book carrying this ISBN.
pub fn find_book_by_isbn(conn: &Connection, isbn: &str) -> Result<Option<Book>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE isbn = ?1 ORDER BY book_id LIMIT 1"
    ))?;
    optional(stmt.query_row(params![isbn], row_to_book))
}

/// Find a book by title, publisher, and edition.
///
/// A missing edition matches both NULL and empty stored editions.
pub fn find_book_by_title_publisher_edition(
    conn: &Connection,
    title: &str,
    publisher_id: i64,
    edition: Option<&str>,
) -> Result<Option<Book>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOK_COLUMNS} FROM books
         WHERE title = ?1 AND publisher_id = ?2 AND COALESCE(edition, '') = COALESCE(?3, '')
         ORDER BY book_id LIMIT 1"
    ))?;
    optional(stmt.query_row(params![title, publisher_id, edition], row_to_book))
}

/// Insert a new book. Every column is bound; absent values are stored as NULL.
pub fn insert_book(conn: &Connection, book: &NewBook) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO books (title, publisher_id, pages, isbn, cover_image, edition)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            book.title,
            book.publisher_id,
            book.pages,
            book.isbn,
            book.cover_image,
            book.edition,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        publisher_id: row.get(2)?,
        pages: row.get(3)?,
        isbn: row.get(4)?,
        cover_image: row.get(5)?,
        edition: row.get(6)?,
    })
}

// ── Copy Operations ─────────────────────────────────────────────────────────

/// Insert a new copy with status "Available". Returns the generated ID.
pub fn insert_book_copy(conn: &Connection, copy: &NewBookCopy) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO book_copies (book_id, accession_no, call_no, edition, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            copy.book_id,
            copy.accession_no,
            copy.call_no,
            copy.edition,
            COPY_STATUS_AVAILABLE,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Author Link Operations ──────────────────────────────────────────────────

/// Link an author to a book. Returns `false` if the link already existed.
pub fn link_author(
    conn: &Connection,
    book_id: i64,
    author_id: i64,
    author_order: i64,
) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO book_authors (book_id, author_id, author_order)
         VALUES (?1, ?2, ?3)",
        params![book_id, author_id, author_order],
    )?;
    Ok(inserted == 1)
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Record an import run. The `id` field of `run` is ignored; returns the new ID.
pub fn insert_import_run(conn: &Connection, run: &ImportRun) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, started_at, finished_at, total_rows,
             success_count, error_count, dry_run)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            run.source_name,
            run.started_at,
            run.finished_at,
            run.total_rows,
            run.success_count,
            run.error_count,
            run.dry_run,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn optional<T>(result: rusqlite::Result<T>) -> Result<Option<T>, OperationError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
