//! Row progress callbacks for [`import_sheet`](crate::import_sheet).

/// Receives progress from an import run.
pub trait ImportProgress {
    /// Announces the run, once, before the first row.
    fn on_phase(&self, message: &str);

    /// Reports a finished row. `current` is the 1-based row number.
    fn on_row(&self, current: usize, total: usize, title: &str);

    /// Reports the summary line after the last row.
    fn on_complete(&self, message: &str);
}

/// Discards everything.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_row(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Logs a checkpoint every `every` rows, for output that is not a terminal.
pub struct LogProgress {
    every: usize,
}

impl LogProgress {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }

    /// Whether row `current` of `total` gets a log line.
    pub fn is_checkpoint(&self, current: usize, total: usize) -> bool {
        current == total || current.is_multiple_of(self.every)
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_row(&self, current: usize, total: usize, title: &str) {
        if self.is_checkpoint(current, total) {
            log::info!("  row {} of {}: {}", current, total, title);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
