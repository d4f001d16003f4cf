//! Row-by-row import of a holdings sheet.
//!
//! Each row moves through `Pending → Normalizing → Reconciling` and ends
//! `Committed` or `RolledBack`. All database work for a row happens inside
//! its own transaction, so a failing row leaves nothing behind and the next
//! row proceeds normally. In a dry run every row runs inside a savepoint of
//! one outer transaction that is rolled back at the end, so later rows still
//! see what earlier rows would have created.

use holdings_catalog::{ImportRun, NewBookCopy};
use holdings_db::operations::{self, OperationError};
use holdings_media::CoverIndex;
use rusqlite::{Connection, Transaction};
use thiserror::Error;

use crate::audit::RunLog;
use crate::progress::ImportProgress;
use crate::reconcile::{
    AuthorResolution, BookResolution, get_or_create_author, get_or_create_publisher, resolve_book,
};
use crate::row::{NormalizedRow, normalize_row};
use crate::sheet::{REQUIRED_COLUMNS, Sheet, SheetError, require_columns};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Spreadsheet error: {0}")]
    Sheet(#[from] SheetError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Run every row, then roll all changes back.
    pub dry_run: bool,
}

/// Lifecycle of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Pending,
    Normalizing,
    Reconciling,
    Committed,
    RolledBack,
}

/// Terminal result of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Committed {
        book_id: i64,
        copy_id: i64,
        book_created: bool,
    },
    RolledBack {
        reason: String,
    },
}

impl RowOutcome {
    pub fn state(&self) -> RowState {
        match self {
            RowOutcome::Committed { .. } => RowState::Committed,
            RowOutcome::RolledBack { .. } => RowState::RolledBack,
        }
    }
}

/// Statistics from a single sheet import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total: u64,
    pub success: u64,
    pub errors: u64,
    pub books_created: u64,
    pub books_reused: u64,
    pub authors_created: u64,
    pub publishers_created: u64,
    pub copies_created: u64,
}

/// Everything an import produced.
#[derive(Debug)]
pub struct ImportReport {
    pub stats: ImportStats,
    /// One outcome per data row, in sheet order.
    pub outcomes: Vec<RowOutcome>,
    pub log: RunLog,
    pub started_at: String,
    pub finished_at: String,
    pub dry_run: bool,
}

/// Entity counts for one row, merged into the run totals only on success.
#[derive(Debug, Default)]
struct RowCounts {
    authors_created: u64,
    publishers_created: u64,
}

struct RowResult {
    book_id: i64,
    copy_id: i64,
    book_created: bool,
    counts: RowCounts,
}

/// Import every row of `sheet`.
///
/// Missing required columns abort before any row is touched. Per-row failures
/// are rolled back, logged, and counted; they never abort the run.
pub fn import_sheet(
    conn: &Connection,
    sheet: &Sheet,
    covers: &CoverIndex,
    options: &ImportOptions,
    progress: &dyn ImportProgress,
) -> Result<ImportReport, ImportError> {
    let started_at = chrono::Local::now().to_rfc3339();
    let mut log = RunLog::new();

    if let Err(e) = require_columns(sheet, REQUIRED_COLUMNS) {
        log::error!("{}", e);
        return Err(e.into());
    }
    log.run(format!("Found columns: {}", sheet.headers().join(", ")));
    let phase = format!(
        "Starting import of {} records{}",
        sheet.len(),
        if options.dry_run { " (dry run)" } else { "" }
    );
    progress.on_phase(&phase);
    log.run(phase);

    let mut stats = ImportStats {
        total: sheet.len() as u64,
        ..Default::default()
    };
    let mut outcomes = Vec::with_capacity(sheet.len());
    let mut outer = if options.dry_run {
        Some(conn.unchecked_transaction()?)
    } else {
        None
    };

    for row in sheet.rows() {
        let n = row.number();
        log.status(
            n,
            format!(
                "Title: '{}' | Author(s): '{}' | ISBN: '{}' | Status: Processing",
                row.get("TITLE").trim(),
                row.get("AUTHOR").trim(),
                row.get("ISBN").trim()
            ),
        );

        let normalized = normalize_row(&row, &mut log);
        let result = in_unit_of_work(conn, outer.as_mut(), |tx| {
            reconcile_row(tx, &normalized, covers, &mut log)
        });

        let outcome = match result {
            Ok(done) => {
                stats.success += 1;
                stats.copies_created += 1;
                stats.authors_created += done.counts.authors_created;
                stats.publishers_created += done.counts.publishers_created;
                if done.book_created {
                    stats.books_created += 1;
                } else {
                    stats.books_reused += 1;
                }
                log.status(
                    n,
                    format!(
                        "Status: Success | Book ID: {}, Copy ID: {}",
                        done.book_id, done.copy_id
                    ),
                );
                RowOutcome::Committed {
                    book_id: done.book_id,
                    copy_id: done.copy_id,
                    book_created: done.book_created,
                }
            }
            Err(e) => {
                stats.errors += 1;
                log.failed(n, format!("Status: Failed | {}", e));
                RowOutcome::RolledBack {
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
        progress.on_row(n, sheet.len(), &normalized.title);
    }

    if let Some(outer) = outer {
        outer.rollback()?;
        log.run("Dry run: all changes rolled back");
    }

    log.run(RunLog::summary_line(&stats));
    if stats.errors > 0 {
        log::warn!(
            "Completed with {} errors. Please check the log for details.",
            stats.errors
        );
    }
    progress.on_complete(&RunLog::summary_line(&stats));

    Ok(ImportReport {
        stats,
        outcomes,
        log,
        started_at,
        finished_at: chrono::Local::now().to_rfc3339(),
        dry_run: options.dry_run,
    })
}

/// Run `work` in its own transaction, or in a savepoint of `outer` when one
/// is given. Commits on success; dropping the guard on error rolls back.
fn in_unit_of_work<T>(
    conn: &Connection,
    outer: Option<&mut Transaction<'_>>,
    work: impl FnOnce(&Connection) -> Result<T, ImportError>,
) -> Result<T, ImportError> {
    match outer {
        Some(outer) => {
            let sp = outer.savepoint()?;
            let value = work(&*sp)?;
            sp.commit()?;
            Ok(value)
        }
        None => {
            let tx = conn.unchecked_transaction()?;
            let value = work(&*tx)?;
            tx.commit()?;
            Ok(value)
        }
    }
}

/// Resolve and write everything for one cleaned row.
fn reconcile_row(
    conn: &Connection,
    row: &NormalizedRow,
    covers: &CoverIndex,
    log: &mut RunLog,
) -> Result<RowResult, ImportError> {
    let n = row.number;
    let mut counts = RowCounts::default();

    // Publisher
    let publisher = get_or_create_publisher(conn, &row.publisher)?;
    if publisher.was_created() {
        counts.publishers_created += 1;
        log.created(
            n,
            format!("Publisher: '{}' | Created with ID: {}", row.publisher, publisher.id()),
        );
    } else {
        log.reused(
            n,
            format!("Publisher: '{}' | Found existing ID: {}", row.publisher, publisher.id()),
        );
    }

    // Authors, duplicates within the row collapsed
    let mut author_ids: Vec<i64> = Vec::new();
    for name in &row.authors {
        let resolution = get_or_create_author(conn, name)?;
        match &resolution {
            AuthorResolution::Exact(id) | AuthorResolution::FirstLast(id) => {
                log.reused(n, format!("Author: '{}' | Found existing ID: {}", name, id));
            }
            AuthorResolution::Backfilled {
                id,
                previous_middle,
            } => {
                log.normalized(
                    n,
                    format!(
                        "Author: '{}' | Updating middle name of ID {} from '{}' to '{}'",
                        name, id, previous_middle, name.middle
                    ),
                );
            }
            AuthorResolution::Created(id) => {
                counts.authors_created += 1;
                log.created(n, format!("Author: '{}' | Created with ID: {}", name, id));
            }
        }
        if !author_ids.contains(&resolution.id()) {
            author_ids.push(resolution.id());
        }
    }

    // Cover
    let cover_image = row.isbn.as_deref().and_then(|isbn| covers.cover_for(isbn));
    if let Some(ref cover) = cover_image {
        log.normalized(n, format!("Found cover image: {}", cover));
    }

    // Book
    let book = resolve_book(conn, row, publisher.id(), cover_image)?;
    match &book {
        BookResolution::ByIsbn(id) => log.reused(
            n,
            format!("Book: found by ISBN '{}' -> ID: {}", row.isbn.as_deref().unwrap_or(""), id),
        ),
        BookResolution::ByTitlePublisherEdition(id) => log.reused(
            n,
            format!(
                "Book: found by Title+Publisher+Edition ('{}', {}, '{}') -> ID: {}",
                row.title,
                publisher.id(),
                row.edition.as_deref().unwrap_or(""),
                id
            ),
        ),
        BookResolution::Created(id) => log.created(
            n,
            format!("Book: '{}' | Created with ID: {}", row.title, id),
        ),
    }

    // Copy
    let copy_id = operations::insert_book_copy(
        conn,
        &NewBookCopy {
            book_id: book.id(),
            accession_no: row.accession.clone(),
            call_no: row.call_no.clone(),
            edition: row.edition.clone(),
        },
    )?;
    log.created(n, format!("Book copy '{}' | Created with ID: {}", row.accession, copy_id));

    // Author links
    for (i, author_id) in author_ids.iter().enumerate() {
        operations::link_author(conn, book.id(), *author_id, i as i64 + 1)?;
    }

    Ok(RowResult {
        book_id: book.id(),
        copy_id,
        book_created: book.was_created(),
        counts,
    })
}

/// Record a finished run in the `import_log` table.
pub fn log_import(
    conn: &Connection,
    source_name: &str,
    report: &ImportReport,
) -> Result<i64, ImportError> {
    let run = ImportRun {
        id: 0,
        source_name: source_name.to_string(),
        started_at: report.started_at.clone(),
        finished_at: report.finished_at.clone(),
        total_rows: report.stats.total as i64,
        success_count: report.stats.success as i64,
        error_count: report.stats.errors as i64,
        dry_run: report.dry_run,
    };
    Ok(operations::insert_import_run(conn, &run)?)
}
