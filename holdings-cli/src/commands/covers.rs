use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use holdings_books::{GoogleBooksClient, save_covers, unique_isbns};

use crate::CliError;
use crate::cli_types::GoogleBooksArgs;
use crate::progress::FetchBar;
use crate::settings::Settings;

/// Duplicate ISBNs are listed by name only up to this many.
const MAX_LISTED_DUPLICATES: usize = 10;

/// Download a cover for every unique ISBN in the sheet's ISBN column.
pub(crate) fn run_fetch_covers(
    settings: &Settings,
    input: PathBuf,
    dir: Option<PathBuf>,
    google: GoogleBooksArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let sheet = super::load_sheet(&input)?;
    let values = sheet
        .column_values("ISBN")
        .map_err(|e| CliError::sheet(e.to_string()))?;
    let isbns = unique_isbns(&values);

    if !isbns.duplicates.is_empty() {
        log::info!(
            "Note: Found {} duplicate ISBNs. Processing each unique ISBN only once.",
            isbns.duplicates.len()
        );
        if isbns.duplicates.len() <= MAX_LISTED_DUPLICATES {
            log::info!("Duplicate ISBNs: {}", isbns.duplicates.join(", "));
        }
    }

    let (dir, _) = settings.covers_dir(dir);
    let api_key = settings.api_key(google.api_key);
    let client = GoogleBooksClient::new(api_key.key, settings.request_delay(google.delay_ms))
        .map_err(|e| CliError::api(e.to_string()))?;

    log::info!(
        "{}",
        format!(
            "Processing {} unique ISBNs into {}",
            isbns.unique.len(),
            dir.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let progress = FetchBar::new(quiet);
    let stats = save_covers(&client, &isbns.unique, &dir, &progress)
        .map_err(|e| CliError::api(e.to_string()))?;

    log::info!(
        "{} {} saved, {} already present, {} failed",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.saved,
        stats.skipped,
        stats.failed,
    );
    Ok(())
}
