//! Read queries for the holdings database.

use holdings_catalog::types::*;
use rusqlite::{Connection, params};

use crate::operations::{OperationError, row_to_book};

// ── Book Lookups ────────────────────────────────────────────────────────────

/// Fetch a book by ID.
pub fn get_book(conn: &Connection, book_id: i64) -> Result<Option<Book>, OperationError> {
    let result = conn.query_row(
        "SELECT book_id, title, publisher_id, pages, isbn, cover_image, edition
         FROM books WHERE book_id = ?1",
        params![book_id],
        row_to_book,
    );
    match result {
        Ok(book) => Ok(Some(book)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List the copies of a book in insertion order.
pub fn copies_for_book(conn: &Connection, book_id: i64) -> Result<Vec<BookCopy>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT copy_id, book_id, accession_no, call_no, edition, status
         FROM book_copies WHERE book_id = ?1 ORDER BY copy_id",
    )?;
    let rows = stmt.query_map(params![book_id], |row| {
        Ok(BookCopy {
            id: row.get(0)?,
            book_id: row.get(1)?,
            accession_no: row.get(2)?,
            call_no: row.get(3)?,
            edition: row.get(4)?,
            status: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List a book's authors by credit order.
pub fn authors_for_book(
    conn: &Connection,
    book_id: i64,
) -> Result<Vec<BookAuthor>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT a.author_id, a.first_name, a.middle_name, a.last_name, ba.author_order
         FROM book_authors ba
         JOIN authors a ON a.author_id = ba.author_id
         WHERE ba.book_id = ?1
         ORDER BY ba.author_order",
    )?;
    let rows = stmt.query_map(params![book_id], |row| {
        Ok(BookAuthor {
            author: Author {
                id: row.get(0)?,
                first_name: row.get(1)?,
                middle_name: row.get(2)?,
                last_name: row.get(3)?,
            },
            author_order: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// List recorded import runs, most recent first.
pub fn list_import_runs(conn: &Connection, limit: usize) -> Result<Vec<ImportRun>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, source_name, started_at, finished_at, total_rows,
                success_count, error_count, dry_run
         FROM import_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(ImportRun {
            id: row.get(0)?,
            source_name: row.get(1)?,
            started_at: row.get(2)?,
            finished_at: row.get(3)?,
            total_rows: row.get(4)?,
            success_count: row.get(5)?,
            error_count: row.get(6)?,
            dry_run: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary counts for the whole catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub publishers: i64,
    pub authors: i64,
    pub books: i64,
    pub copies: i64,
    pub author_links: i64,
    pub books_with_isbn: i64,
    pub books_with_cover: i64,
    pub placeholder_books: i64,
}

/// Gather summary counts.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |sql: &str| -> Result<i64, OperationError> {
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    };

    let placeholder_books: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books b
         JOIN publishers p ON p.publisher_id = b.publisher_id
         WHERE b.title = ?1 OR p.name = ?2",
        params![PLACEHOLDER_TITLE, PLACEHOLDER_PUBLISHER],
        |row| row.get(0),
    )?;

    Ok(CatalogStats {
        publishers: count("SELECT COUNT(*) FROM publishers")?,
        authors: count("SELECT COUNT(*) FROM authors")?,
        books: count("SELECT COUNT(*) FROM books")?,
        copies: count("SELECT COUNT(*) FROM book_copies")?,
        author_links: count("SELECT COUNT(*) FROM book_authors")?,
        books_with_isbn: count("SELECT COUNT(*) FROM books WHERE isbn IS NOT NULL")?,
        books_with_cover: count("SELECT COUNT(*) FROM books WHERE cover_image IS NOT NULL")?,
        placeholder_books,
    })
}
