//! Tabular input and output.
//!
//! Spreadsheets are read into an in-memory grid of strings. Excel and
//! OpenDocument workbooks go through calamine (first worksheet only), CSV
//! through the csv crate. Output is written as `.xlsx` or `.csv`.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use thiserror::Error;

/// Columns a holdings sheet must have (header names are trimmed).
pub const REQUIRED_COLUMNS: &[&str] = &[
    "TITLE",
    "AUTHOR",
    "PUBLISHER",
    "CALL NO.",
    "ACCESSION",
    "ISBN",
    "ED./VOL.",
    "PAGES",
];

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Unsupported spreadsheet type: {0}")]
    UnsupportedFormat(String),
    #[error("Workbook {0} has no worksheets")]
    NoWorksheet(String),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
}

/// A header row plus data rows, all as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Build a sheet. Headers are trimmed; short rows are padded with empty cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name.trim())
    }

    pub fn rows(&self) -> impl Iterator<Item = SheetRow<'_>> {
        (0..self.rows.len()).map(move |index| SheetRow { sheet: self, index })
    }

    pub fn row(&self, index: usize) -> Option<SheetRow<'_>> {
        (index < self.rows.len()).then_some(SheetRow { sheet: self, index })
    }

    /// Every value in one column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>, SheetError> {
        let col = self
            .column_index(name)
            .ok_or_else(|| SheetError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[col].clone()).collect())
    }

    /// Return the index of `name`, appending an empty column if it is missing.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(col) = self.column_index(name) {
            return col;
        }
        self.headers.push(name.trim().to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    /// Set one cell, creating the column if needed. Out-of-range rows are ignored.
    pub fn set(&mut self, index: usize, column: &str, value: impl Into<String>) {
        let col = self.ensure_column(column);
        if let Some(row) = self.rows.get_mut(index) {
            row[col] = value.into();
        }
    }
}

/// A borrowed view of one data row.
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    sheet: &'a Sheet,
    index: usize,
}

impl<'a> SheetRow<'a> {
    /// Zero-based position among the data rows.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based row number used in log messages.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Cell value by column name; empty when the column does not exist.
    pub fn get(&self, column: &str) -> &'a str {
        self.sheet
            .column_index(column)
            .and_then(|col| self.sheet.rows[self.index].get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

// ── Reading ─────────────────────────────────────────────────────────────────

/// Read a spreadsheet, choosing the parser by file extension.
pub fn read_sheet(path: &Path) -> Result<Sheet, SheetError> {
    match extension(path).as_str() {
        "csv" => read_csv(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path),
        other => Err(SheetError::UnsupportedFormat(other.to_string())),
    }
}

fn read_csv(path: &Path) -> Result<Sheet, SheetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(Sheet::new(headers, rows))
}

fn read_workbook(path: &Path) -> Result<Sheet, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet(path.display().to_string()))??;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    let rows = rows
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();
    Ok(Sheet::new(headers, rows))
}

/// Render a cell the way it reads in the spreadsheet.
///
/// Whole floats print without a fractional part so numeric ISBNs and
/// accession numbers survive ("9780131103627", not "9780131103627.0").
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

/// Fail with the sorted list of `required` columns missing from the sheet.
pub fn require_columns(sheet: &Sheet, required: &[&str]) -> Result<(), SheetError> {
    let mut missing: Vec<String> = required
        .iter()
        .filter(|name| sheet.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    Err(SheetError::MissingColumns(missing))
}

// ── Writing ─────────────────────────────────────────────────────────────────

/// Write a sheet as `.xlsx` or `.csv`, by extension.
pub fn write_sheet(sheet: &Sheet, path: &Path) -> Result<(), SheetError> {
    match extension(path).as_str() {
        "csv" => write_csv(sheet, path),
        "xlsx" => write_xlsx(sheet, path),
        other => Err(SheetError::UnsupportedFormat(other.to_string())),
    }
}

fn write_csv(sheet: &Sheet, path: &Path) -> Result<(), SheetError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(sheet: &Sheet, path: &Path) -> Result<(), SheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }
    for (r, row) in sheet.rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match whole_number(value) {
                Some(n) => worksheet.write_number(r as u32 + 1, col as u16, n)?,
                None => worksheet.write_string(r as u32 + 1, col as u16, value)?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Integer text that Excel's General format shows unchanged: no leading zero
/// and at most 11 digits. ISBNs and zero-padded accessions stay text.
fn whole_number(value: &str) -> Option<f64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let canonical = !digits.is_empty()
        && digits.len() <= 11
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !(digits.len() > 1 && digits.starts_with('0'));
    if !canonical {
        return None;
    }
    value.parse::<i64>().ok().map(|n| n as f64)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}
