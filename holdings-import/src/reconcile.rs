//! Find-or-create resolution of catalog entities.
//!
//! Each row resolves to exactly one publisher, one or more authors, and one
//! book. Lookups and inserts run on whatever connection the caller passes in,
//! normally the row's open transaction, and assume a single writer.

use holdings_catalog::{AuthorName, NewBook, is_placeholder_middle};
use holdings_db::operations::{self, OperationError};
use rusqlite::Connection;

use crate::row::NormalizedRow;

/// Result of a find-or-create lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Found(i64),
    Created(i64),
}

impl Resolved {
    pub fn id(&self) -> i64 {
        match self {
            Resolved::Found(id) | Resolved::Created(id) => *id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolved::Created(_))
    }
}

/// An entity that can be looked up by an exact natural key.
pub trait FindOrCreate {
    type Key: ?Sized;

    fn find(conn: &Connection, key: &Self::Key) -> Result<Option<i64>, OperationError>;
    fn create(conn: &Connection, key: &Self::Key) -> Result<i64, OperationError>;
}

/// Publishers keyed by normalized name.
pub struct PublisherByName;

impl FindOrCreate for PublisherByName {
    type Key = str;

    fn find(conn: &Connection, key: &str) -> Result<Option<i64>, OperationError> {
        operations::find_publisher_by_name(conn, key)
    }

    fn create(conn: &Connection, key: &str) -> Result<i64, OperationError> {
        operations::insert_publisher(conn, key)
    }
}

/// Return the existing identity for `key`, inserting it first if absent.
pub fn get_or_create<E: FindOrCreate>(
    conn: &Connection,
    key: &E::Key,
) -> Result<Resolved, OperationError> {
    match E::find(conn, key)? {
        Some(id) => Ok(Resolved::Found(id)),
        None => E::create(conn, key).map(Resolved::Created),
    }
}

pub fn get_or_create_publisher(conn: &Connection, name: &str) -> Result<Resolved, OperationError> {
    get_or_create::<PublisherByName>(conn, name)
}

// ── Authors ─────────────────────────────────────────────────────────────────

/// How an author name was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorResolution {
    /// All three name parts matched.
    Exact(i64),
    /// First and last matched; the stored middle name was kept.
    FirstLast(i64),
    /// First and last matched and a placeholder middle name was replaced.
    Backfilled { id: i64, previous_middle: String },
    Created(i64),
}

impl AuthorResolution {
    pub fn id(&self) -> i64 {
        match self {
            AuthorResolution::Exact(id)
            | AuthorResolution::FirstLast(id)
            | AuthorResolution::Created(id) => *id,
            AuthorResolution::Backfilled { id, .. } => *id,
        }
    }
}

/// Resolve an author in three tiers: exact name, then first+last with
/// middle-name backfill, then insert.
///
/// The stored middle name is only overwritten when it is a placeholder and
/// the incoming one is not.
pub fn get_or_create_author(
    conn: &Connection,
    name: &AuthorName,
) -> Result<AuthorResolution, OperationError> {
    if let Some(id) = operations::find_author_exact(conn, name)? {
        return Ok(AuthorResolution::Exact(id));
    }

    if let Some(existing) = operations::find_author_by_first_last(conn, &name.first, &name.last)? {
        if is_placeholder_middle(&existing.middle_name) && !is_placeholder_middle(&name.middle) {
            operations::update_author_middle(conn, existing.id, &name.middle)?;
            return Ok(AuthorResolution::Backfilled {
                id: existing.id,
                previous_middle: existing.middle_name,
            });
        }
        return Ok(AuthorResolution::FirstLast(existing.id));
    }

    operations::insert_author(conn, name).map(AuthorResolution::Created)
}

// ── Books ───────────────────────────────────────────────────────────────────

/// How a row's book was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookResolution {
    ByIsbn(i64),
    ByTitlePublisherEdition(i64),
    Created(i64),
}

impl BookResolution {
    pub fn id(&self) -> i64 {
        match self {
            BookResolution::ByIsbn(id)
            | BookResolution::ByTitlePublisherEdition(id)
            | BookResolution::Created(id) => *id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, BookResolution::Created(_))
    }
}

/// Find the row's book by ISBN, then by title, publisher and edition, and
/// create it if neither matches.
///
/// Rows with a placeholder title or publisher always get a new book.
pub fn resolve_book(
    conn: &Connection,
    row: &NormalizedRow,
    publisher_id: i64,
    cover_image: Option<String>,
) -> Result<BookResolution, OperationError> {
    if row.is_matchable() {
        if let Some(ref isbn) = row.isbn
            && let Some(book) = operations::find_book_by_isbn(conn, isbn)?
        {
            return Ok(BookResolution::ByIsbn(book.id));
        }
        if let Some(book) = operations::find_book_by_title_publisher_edition(
            conn,
            &row.title,
            publisher_id,
            row.edition.as_deref(),
        )? {
            return Ok(BookResolution::ByTitlePublisherEdition(book.id));
        }
    }

    let book = NewBook {
        title: row.title.clone(),
        publisher_id,
        pages: row.pages,
        isbn: row.isbn.clone(),
        cover_image,
        edition: row.edition.clone(),
    };
    operations::insert_book(conn, &book).map(BookResolution::Created)
}
