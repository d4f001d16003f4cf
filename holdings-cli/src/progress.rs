//! Progress bars for the long row and file passes.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use holdings_books::{CoverResult, CoverStats, FetchProgress};
use holdings_import::ImportProgress;

/// A counted bar, hidden when `quiet` is set.
pub(crate) fn bar(total: usize, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) =
        ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.tick_chars("/-\\|").progress_chars("=> "));
    }
    pb
}

/// Drives a bar from import callbacks.
pub(crate) struct ImportBar {
    pb: ProgressBar,
}

impl ImportBar {
    pub(crate) fn new(quiet: bool) -> Self {
        Self { pb: bar(0, quiet) }
    }
}

impl ImportProgress for ImportBar {
    fn on_row(&self, current: usize, total: usize, title: &str) {
        if self.pb.length() != Some(total as u64) {
            self.pb.set_length(total as u64);
        }
        self.pb.set_position(current as u64);
        self.pb.set_message(title.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::info!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}

/// Drives a bar from cover-fetch callbacks.
pub(crate) struct FetchBar {
    pb: ProgressBar,
}

impl FetchBar {
    pub(crate) fn new(quiet: bool) -> Self {
        Self { pb: bar(0, quiet) }
    }
}

impl FetchProgress for FetchBar {
    fn on_start(&self, total: usize) {
        self.pb.set_length(total as u64);
    }

    fn on_result(&self, index: usize, isbn: &str, result: &CoverResult) {
        self.pb.set_position(index as u64 + 1);
        self.pb.set_message(isbn.to_string());
        if let CoverResult::Failed { title } = result {
            self.pb.suspend(|| {
                log::warn!(
                    "  {} {} ({})",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    isbn,
                    title.as_deref().unwrap_or("Title not found"),
                )
            });
        }
    }

    fn on_complete(&self, _stats: &CoverStats) {
        self.pb.finish_and_clear();
    }
}
