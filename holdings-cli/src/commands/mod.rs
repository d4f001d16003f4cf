pub(crate) mod config;
pub(crate) mod convert;
pub(crate) mod covers;
pub(crate) mod import;
pub(crate) mod lookup;
pub(crate) mod stats;

use std::path::Path;

use holdings_import::Sheet;

use crate::CliError;

/// Read a spreadsheet, mapping failures to a CLI error naming the file.
pub(crate) fn load_sheet(path: &Path) -> Result<Sheet, CliError> {
    holdings_import::read_sheet(path)
        .map_err(|e| CliError::sheet(format!("Failed to read {}: {}", path.display(), e)))
}

/// Truncate a string to a maximum number of characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
