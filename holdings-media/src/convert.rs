//! Re-encoding cover images.
//!
//! A source is only deleted once the converted file has been written, flushed
//! and decoded again with matching dimensions.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

use crate::{MediaError, TargetFormat};

/// Source extensions picked up by a batch conversion.
pub const CONVERTIBLE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub format: TargetFormat,
    /// Lossy quality (1-100) for WebP and JPEG. PNG ignores it.
    pub quality: u8,
    pub remove_original: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: TargetFormat::Webp,
            quality: 90,
            remove_original: false,
        }
    }
}

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub output: PathBuf,
    /// Set when removal was requested and succeeded.
    pub source_removed: bool,
}

/// Counters for a batch conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub removed: usize,
    pub remove_failed: usize,
}

/// Convert `source` into `options.format`, writing next to it.
///
/// The output is re-opened and decoded before the source is touched. A failed
/// removal is logged and reported through `source_removed`, not as an error.
pub fn convert_image(
    source: &Path,
    options: &ConvertOptions,
) -> Result<ConvertOutcome, MediaError> {
    let output = source.with_extension(options.format.extension());
    if output == source {
        return Err(MediaError::UnsupportedFormat(format!(
            "{} is already .{}",
            source.display(),
            options.format
        )));
    }

    let img = image::open(source)?;
    encode(&img, &output, options)?;
    verify(&output, img.width(), img.height())?;
    log::debug!("Converted {} -> {}", source.display(), output.display());

    let mut source_removed = false;
    if options.remove_original {
        match std::fs::remove_file(source) {
            Ok(()) => source_removed = true,
            Err(e) => log::warn!("Could not remove {}: {}", source.display(), e),
        }
    }

    Ok(ConvertOutcome {
        output,
        source_removed,
    })
}

/// Convert every convertible image directly inside `dir`.
///
/// Files already in the target format are skipped. `on_file` is called before
/// each conversion with the 1-based position, the total, and the path.
pub fn batch_convert(
    dir: &Path,
    options: &ConvertOptions,
    mut on_file: impl FnMut(usize, usize, &Path),
) -> Result<ConvertStats, MediaError> {
    let mut stats = ConvertStats::default();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
        else {
            continue;
        };
        if !CONVERTIBLE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        if TargetFormat::from_str_lossy(&ext) == Some(options.format) {
            stats.skipped += 1;
            continue;
        }
        files.push(path);
    }
    files.sort();

    let total = files.len();
    for (i, path) in files.iter().enumerate() {
        on_file(i + 1, total, path);
        match convert_image(path, options) {
            Ok(outcome) => {
                stats.converted += 1;
                if options.remove_original {
                    if outcome.source_removed {
                        stats.removed += 1;
                    } else {
                        stats.remove_failed += 1;
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to convert {}: {}", path.display(), e);
                stats.failed += 1;
            }
        }
    }

    log::debug!(
        "Converted {} of {} images ({} failed, {} skipped)",
        stats.converted,
        total,
        stats.failed,
        stats.skipped
    );
    Ok(stats)
}

fn encode(img: &DynamicImage, output: &Path, options: &ConvertOptions) -> Result<(), MediaError> {
    let quality = options.quality.clamp(1, 100);
    let mut writer = BufWriter::new(File::create(output)?);
    match options.format {
        TargetFormat::Webp => {
            // libwebp only takes 8-bit RGB or RGBA buffers
            let img = if img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            };
            let encoder = webp::Encoder::from_image(&img)
                .map_err(|e| MediaError::Encode(e.to_string()))?;
            writer.write_all(&encoder.encode(f32::from(quality)))?;
        }
        TargetFormat::Jpeg => {
            // JPEG has no alpha channel
            let img = DynamicImage::ImageRgb8(img.to_rgb8());
            img.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))?;
        }
        TargetFormat::Png => {
            img.write_with_encoder(PngEncoder::new(&mut writer))?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn verify(output: &Path, width: u32, height: u32) -> Result<(), MediaError> {
    let reread = image::open(output).map_err(|e| MediaError::Verify {
        path: output.display().to_string(),
        reason: e.to_string(),
    })?;
    if reread.width() != width || reread.height() != height {
        return Err(MediaError::Verify {
            path: output.display().to_string(),
            reason: format!(
                "expected {}x{}, decoded {}x{}",
                width,
                height,
                reread.width(),
                reread.height()
            ),
        });
    }
    Ok(())
}
