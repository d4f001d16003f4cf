use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{Settings, Source, settings_path};

fn file_or_default<T>(value: &Option<T>) -> Source {
    if value.is_some() {
        Source::ConfigFile
    } else {
        Source::Default
    }
}

/// Show effective settings and where each value came from.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    log::info!(
        "{}",
        "Holdings Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match settings_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let (db, db_source) = settings.database(None);
    let (covers_dir, covers_source) = settings.covers_dir(None);
    let (log_dir, log_source) = settings.log_dir(None);
    let api_key = settings.api_key(None);
    let format = settings.cover_format(None)?;

    let rows: Vec<(&str, String, String)> = vec![
        ("database", db.display().to_string(), db_source.to_string()),
        (
            "covers_dir",
            covers_dir.display().to_string(),
            covers_source.to_string(),
        ),
        ("log_dir", log_dir.display().to_string(), log_source.to_string()),
        (
            "api_key",
            api_key.masked().unwrap_or_else(|| "-".to_string()),
            api_key.source.to_string(),
        ),
        (
            "request_delay_ms",
            settings.request_delay(None).as_millis().to_string(),
            file_or_default(&settings.google_books.request_delay_ms).to_string(),
        ),
        (
            "match_threshold",
            settings.match_threshold(None).to_string(),
            file_or_default(&settings.google_books.match_threshold).to_string(),
        ),
        (
            "cover_extension",
            format.extension().to_string(),
            file_or_default(&settings.covers.extension).to_string(),
        ),
        (
            "cover_quality",
            settings.cover_quality(None).to_string(),
            file_or_default(&settings.covers.quality).to_string(),
        ),
    ];

    for (name, value, source) in rows {
        log::info!(
            "  {:<18} {} {}",
            format!("{}:", name),
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match settings_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
