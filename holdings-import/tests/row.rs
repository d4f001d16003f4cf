mod common;

use common::holdings_sheet;
use holdings_catalog::*;
use holdings_import::*;

fn normalize_single(cells: [&str; 8]) -> (NormalizedRow, RunLog) {
    let sheet = holdings_sheet(&[cells]);
    let mut log = RunLog::new();
    let row = normalize_row(&sheet.row(0).unwrap(), &mut log);
    (row, log)
}

#[test]
fn empty_row_gets_placeholders() {
    let (row, log) = normalize_single(["", "", "", "", "", "", "", ""]);

    assert_eq!(row.title, PLACEHOLDER_TITLE);
    assert_eq!(row.publisher, PLACEHOLDER_PUBLISHER);
    assert_eq!(row.authors, vec![AuthorName::placeholder()]);
    assert_eq!(row.call_no, PLACEHOLDER_CALL_NO);
    assert_eq!(row.accession, "No Accession_1");
    assert_eq!(row.edition, None);
    assert_eq!(row.pages, 0);
    assert_eq!(row.isbn, None);
    assert!(!row.is_matchable());
    assert!(log.count(EntryKind::Substituted) >= 5);
}

#[test]
fn values_are_cleaned_and_logged() {
    let (row, log) = normalize_single([
        " Noli  Me Tangere ",
        "STI College",
        "Anvil Publishing, Inc.",
        "PL6058.9",
        " A-0002 ",
        "978-971-27-0000-0",
        "N/A",
        "xii, 480 p.",
    ]);

    assert_eq!(row.title, "Noli Me Tangere");
    assert_eq!(row.publisher, "anvil publish");
    assert_eq!(row.authors, vec![AuthorName::organization("STI College")]);
    assert_eq!(row.accession, "A-0002");
    assert_eq!(row.edition, None);
    assert_eq!(row.pages, 480);
    assert_eq!(row.isbn.as_deref(), Some("9789712700000"));
    assert!(row.is_matchable());

    let messages: Vec<&str> = log.entries().iter().map(|e| e.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("Publisher normalized")));
    assert!(messages.iter().any(|m| m.contains("Treated as organization name")));
    assert!(messages.iter().any(|m| m.contains("ISBN normalized")));
    assert_eq!(log.count(EntryKind::Warning), 0);
}

#[test]
fn invalid_isbn_is_dropped_with_warning() {
    let (row, log) = normalize_single(["T", "A B", "P", "C", "A-1", "12345", "", "1"]);

    assert_eq!(row.isbn, None);
    assert_eq!(log.count(EntryKind::Warning), 1);
}

#[test]
fn not_found_isbn_is_silent() {
    let (row, log) = normalize_single(["T", "A B", "P", "C", "A-1", "Not found", "", "1"]);

    assert_eq!(row.isbn, None);
    assert_eq!(log.count(EntryKind::Warning), 0);
}
