use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use holdings_import::{
    ImportError, ImportOptions, ImportProgress, ImportReport, LogProgress, import_sheet, log_import,
};
use holdings_media::CoverIndex;

use crate::CliError;
use crate::progress::ImportBar;
use crate::settings::Settings;

pub(crate) struct ImportArgs {
    pub file: PathBuf,
    pub db: Option<PathBuf>,
    pub covers_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Import a holdings spreadsheet into the catalog database.
pub(crate) fn run_import(
    settings: &Settings,
    args: ImportArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let (db_path, _) = settings.database(args.db);
    let (covers_dir, _) = settings.covers_dir(args.covers_dir);
    let (log_dir, _) = settings.log_dir(args.log_dir);
    let cover_format = settings.cover_format(None)?;

    let sheet = super::load_sheet(&args.file)?;
    let covers = CoverIndex::scan(&covers_dir, cover_format.extension())
        .map_err(|e| CliError::media(format!("Failed to scan {}: {}", covers_dir.display(), e)))?;
    log::info!(
        "Found {} cover images in {}",
        covers.len(),
        covers_dir.display()
    );

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = holdings_db::open_database(&db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            db_path.display(),
            e
        ))
    })?;

    log::info!(
        "{}",
        format!(
            "Importing {} into {}{}",
            args.file.display(),
            db_path.display(),
            if args.dry_run { " (dry run)" } else { "" }
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let options = ImportOptions {
        dry_run: args.dry_run,
    };
    // No bar is drawn off a terminal, so log periodic row counts instead
    let progress: Box<dyn ImportProgress> = if !quiet && !std::io::stdout().is_terminal() {
        Box::new(LogProgress::default())
    } else {
        Box::new(ImportBar::new(quiet))
    };
    let report = import_sheet(&conn, &sheet, &covers, &options, progress.as_ref()).map_err(
        |e| match e {
            ImportError::Sheet(e) => CliError::sheet(e.to_string()),
            other => CliError::database(other.to_string()),
        },
    )?;

    let source_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    if let Err(e) = log_import(&conn, &source_name, &report) {
        log::warn!("Failed to record import run: {}", e);
    }

    let audit_path = write_audit(&report, &log_dir)?;
    print_summary(&report, &audit_path);
    Ok(())
}

/// Write the run log as `import_log_<timestamp>.txt` in `log_dir`.
fn write_audit(report: &ImportReport, log_dir: &Path) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(log_dir)?;
    let name = format!(
        "import_log_{}.txt",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = log_dir.join(name);
    report.log.write_to_file(&path, &report.stats)?;
    Ok(path)
}

fn print_summary(report: &ImportReport, audit_path: &Path) {
    let stats = &report.stats;
    crate::log_blank();
    log::info!(
        "{}",
        "Import Summary".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Rows:                {:>6}", stats.total);
    log::info!(
        "  Imported:            {:>6}",
        stats.success.if_supports_color(Stdout, |t| t.green())
    );
    if stats.errors > 0 {
        log::info!(
            "  Failed:              {:>6}",
            stats.errors.if_supports_color(Stdout, |t| t.red())
        );
    } else {
        log::info!("  Failed:              {:>6}", stats.errors);
    }
    log::info!(
        "  Books:               {:>6} new, {} reused",
        stats.books_created,
        stats.books_reused
    );
    log::info!("  Authors created:     {:>6}", stats.authors_created);
    log::info!("  Publishers created:  {:>6}", stats.publishers_created);
    log::info!("  Copies created:      {:>6}", stats.copies_created);
    if report.dry_run {
        log::info!(
            "  {}",
            "Dry run: no changes were kept".if_supports_color(Stdout, |t| t.yellow())
        );
    }
    log::info!("  Audit log: {}", audit_path.display());
}
