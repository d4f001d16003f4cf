use holdings_import::{REQUIRED_COLUMNS, Sheet};

/// Build a holdings sheet from rows of
/// (title, author, publisher, call no., accession, isbn, ed./vol., pages).
pub fn holdings_sheet(rows: &[[&str; 8]]) -> Sheet {
    Sheet::new(
        REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}
