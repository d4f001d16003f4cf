use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use holdings_books::{GoogleBooksClient, RetryPolicy, lookup_isbn};
use holdings_import::{require_columns, write_sheet};

use crate::CliError;
use crate::cli_types::GoogleBooksArgs;
use crate::settings::Settings;

use super::truncate_str;

/// Value written for rows without an accepted match.
const NOT_FOUND: &str = "Not found";

/// Look up an ISBN for every row and write the enriched sheet.
pub(crate) fn run_lookup_isbn(
    settings: &Settings,
    input: PathBuf,
    output: PathBuf,
    google: GoogleBooksArgs,
    threshold: Option<u32>,
    quiet: bool,
) -> Result<(), CliError> {
    let mut sheet = super::load_sheet(&input)?;
    require_columns(&sheet, &["TITLE", "AUTHOR"]).map_err(|e| CliError::sheet(e.to_string()))?;

    let api_key = settings.api_key(google.api_key);
    if api_key.key.is_none() {
        log::warn!("No Google Books API key set; requests will use the anonymous quota");
    }
    let client = GoogleBooksClient::new(api_key.key, settings.request_delay(google.delay_ms))
        .map_err(|e| CliError::api(e.to_string()))?;
    let threshold = settings.match_threshold(threshold);
    let policy = RetryPolicy::default();

    let total = sheet.len();
    log::info!(
        "{}",
        format!("Looking up ISBNs for {} rows", total).if_supports_color(Stdout, |t| t.bold()),
    );

    let pb = crate::progress::bar(total, quiet);
    let mut found = 0usize;

    for index in 0..total {
        let Some(row) = sheet.row(index) else {
            continue;
        };
        let title = row.get("TITLE").trim().to_string();
        let author = row.get("AUTHOR").trim().to_string();
        pb.set_message(truncate_str(&title, 40));

        let result = lookup_isbn(&client, &title, &author, threshold, &policy);
        pb.suspend(|| match &result {
            Some(m) => log::info!(
                "{}/{} | {} / {} -> ISBN: {}",
                index + 1,
                total,
                title,
                author,
                m.isbn.if_supports_color(Stdout, |t| t.green()),
            ),
            None => log::info!(
                "{}/{} | {} / {} -> {}",
                index + 1,
                total,
                title,
                author,
                NOT_FOUND.if_supports_color(Stdout, |t| t.dimmed()),
            ),
        });

        match result {
            Some(m) => {
                found += 1;
                sheet.set(index, "ISBN", m.isbn);
            }
            None => sheet.set(index, "ISBN", NOT_FOUND),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    write_sheet(&sheet, &output)
        .map_err(|e| CliError::sheet(format!("Failed to write {}: {}", output.display(), e)))?;

    log::info!(
        "{} ISBN lookup completed: {} of {} found. Results saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        found,
        total,
        output.display(),
    );
    Ok(())
}
