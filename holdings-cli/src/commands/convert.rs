use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use holdings_media::{ConvertOptions, TargetFormat, batch_convert};

use crate::CliError;
use crate::settings::Settings;

/// Convert every JPG/JPEG/PNG in the covers directory.
pub(crate) fn run_convert_covers(
    settings: &Settings,
    dir: Option<PathBuf>,
    format: Option<TargetFormat>,
    quality: Option<u8>,
    remove_original: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let (dir, _) = settings.covers_dir(dir);
    if !dir.is_dir() {
        return Err(CliError::media(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let options = ConvertOptions {
        format: settings.cover_format(format)?,
        quality: settings.cover_quality(quality),
        remove_original,
    };

    log::info!(
        "{}",
        format!(
            "Converting images in {} to {}",
            dir.display(),
            options.format.extension().to_uppercase()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let pb = crate::progress::bar(0, quiet);
    let stats = batch_convert(&dir, &options, |current, total, path| {
        pb.set_length(total as u64);
        pb.set_position(current as u64 - 1);
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
    })
    .map_err(|e| CliError::media(e.to_string()))?;
    pb.finish_and_clear();

    log::info!(
        "{} Converted {} images ({} failed, {} already {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.converted,
        stats.failed,
        stats.skipped,
        options.format,
    );
    if remove_original {
        log::info!("  Removed {} originals", stats.removed);
        if stats.remove_failed > 0 {
            log::warn!(
                "  {} originals could not be removed",
                stats.remove_failed
            );
        }
    }
    Ok(())
}
