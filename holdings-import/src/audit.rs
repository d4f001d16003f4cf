//! Per-run audit trail.
//!
//! Every normalization, substitution, creation and failure during an import is
//! recorded with a timestamp and the row it concerns. Entries are mirrored to
//! the `log` facade as they are recorded, and the whole trail can be written
//! to a text file with a closing summary.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::import::ImportStats;

/// What an audit entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Row lifecycle: processing, success, failure summaries.
    Status,
    /// A value was tidied (trimmed, reformatted) but kept.
    Normalized,
    /// An empty or unusable value was replaced by a placeholder or default.
    Substituted,
    /// A new entity was inserted.
    Created,
    /// An existing entity was matched.
    Reused,
    /// Something suspicious that did not stop the row.
    Warning,
    /// The row was rolled back.
    Failed,
}

impl EntryKind {
    fn level(&self) -> log::Level {
        match self {
            EntryKind::Failed => log::Level::Error,
            EntryKind::Warning | EntryKind::Substituted => log::Level::Warn,
            EntryKind::Reused => log::Level::Debug,
            EntryKind::Status | EntryKind::Normalized | EntryKind::Created => log::Level::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    /// One-based data row, or `None` for run-level entries.
    pub row: Option<usize>,
    pub kind: EntryKind,
    pub message: String,
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - ",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind.level()
        )?;
        match self.row {
            Some(row) => write!(f, "Row {} | {}", row, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Collects audit entries for one import run.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<AuditEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and emit it through the `log` facade.
    pub fn record(&mut self, row: Option<usize>, kind: EntryKind, message: impl Into<String>) {
        let entry = AuditEntry {
            timestamp: Local::now(),
            row,
            kind,
            message: message.into(),
        };
        match entry.row {
            Some(row) => log::log!(entry.kind.level(), "Row {} | {}", row, entry.message),
            None => log::log!(entry.kind.level(), "{}", entry.message),
        }
        self.entries.push(entry);
    }

    pub fn run(&mut self, message: impl Into<String>) {
        self.record(None, EntryKind::Status, message);
    }

    pub fn status(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Status, message);
    }

    pub fn normalized(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Normalized, message);
    }

    pub fn substituted(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Substituted, message);
    }

    pub fn created(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Created, message);
    }

    pub fn reused(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Reused, message);
    }

    pub fn warning(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Warning, message);
    }

    pub fn failed(&mut self, row: usize, message: impl Into<String>) {
        self.record(Some(row), EntryKind::Failed, message);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Entries recorded for one row, in order.
    pub fn for_row(&self, row: usize) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |e| e.row == Some(row))
    }

    pub fn count(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// The closing summary line.
    pub fn summary_line(stats: &ImportStats) -> String {
        format!(
            "IMPORT SUMMARY - Total: {}, Success: {}, Errors: {}",
            stats.total, stats.success, stats.errors
        )
    }

    /// Write every entry followed by the run summary.
    pub fn write_to_file(&self, path: &Path, stats: &ImportStats) -> std::io::Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }

        let rule = "=".repeat(80);
        writeln!(file, "{}", rule)?;
        writeln!(file, "{}", Self::summary_line(stats))?;
        writeln!(file, "{}", rule)?;
        writeln!(
            file,
            "Books created: {}, reused: {}; authors created: {}; publishers created: {}; copies created: {}",
            stats.books_created,
            stats.books_reused,
            stats.authors_created,
            stats.publishers_created,
            stats.copies_created
        )?;
        writeln!(
            file,
            "Warnings: {}, substitutions: {}",
            self.count(EntryKind::Warning),
            self.count(EntryKind::Substituted)
        )?;
        file.flush()
    }
}
