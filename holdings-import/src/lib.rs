//! Import library holdings spreadsheets into the catalog database.
//!
//! This crate owns the whole ETL pass: reading the sheet, cleaning each row,
//! reconciling it against existing publishers, authors and books, and writing
//! one copy per row inside its own unit of work. Every decision is recorded in
//! a [`RunLog`] that is written out as the import audit file.

pub mod audit;
pub mod import;
pub mod progress;
pub mod reconcile;
pub mod row;
pub mod sheet;

pub use audit::{AuditEntry, EntryKind, RunLog};
pub use import::{
    ImportError, ImportOptions, ImportReport, ImportStats, RowOutcome, RowState, import_sheet,
    log_import,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use reconcile::{
    AuthorResolution, BookResolution, FindOrCreate, PublisherByName, Resolved, get_or_create,
    get_or_create_author, get_or_create_publisher, resolve_book,
};
pub use row::{NormalizedRow, normalize_row};
pub use sheet::{
    REQUIRED_COLUMNS, Sheet, SheetError, SheetRow, read_sheet, require_columns, write_sheet,
};
