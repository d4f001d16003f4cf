use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::Settings;

use super::truncate_str;

pub(crate) fn run_stats(
    settings: &Settings,
    db: Option<PathBuf>,
    runs: usize,
) -> Result<(), CliError> {
    let (db_path, _) = settings.database(db);

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'holdings import <file>' to create one.");
        return Ok(());
    }

    let conn = holdings_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    let stats = holdings_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Publishers:     {:>8}", stats.publishers);
    log::info!("  Authors:        {:>8}", stats.authors);
    log::info!("  Books:          {:>8}", stats.books);
    log::info!("    with ISBN:    {:>8}", stats.books_with_isbn);
    log::info!("    with cover:   {:>8}", stats.books_with_cover);
    log::info!("    placeholder:  {:>8}", stats.placeholder_books);
    log::info!("  Copies:         {:>8}", stats.copies);
    log::info!("  Author credits: {:>8}", stats.author_links);

    if runs == 0 {
        return Ok(());
    }

    let recent = holdings_db::list_import_runs(&conn, runs)
        .map_err(|e| CliError::database(format!("Failed to list import runs: {}", e)))?;
    crate::log_blank();
    log::info!("{}", "Recent Imports".if_supports_color(Stdout, |t| t.bold()));
    if recent.is_empty() {
        log::info!("  (none)");
    }
    for run in &recent {
        log::info!(
            "  #{:<4} {:<30} {}  {} rows, {} ok, {} failed{}",
            run.id,
            truncate_str(&run.source_name, 30),
            run.started_at.get(..19).unwrap_or(&run.started_at),
            run.total_rows,
            run.success_count,
            run.error_count,
            if run.dry_run {
                format!(" {}", "(dry run)".if_supports_color(Stdout, |t| t.dimmed()))
            } else {
                String::new()
            },
        );
    }

    Ok(())
}
