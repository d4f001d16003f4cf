use holdings_import::*;

#[test]
fn csv_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holdings.csv");
    std::fs::write(
        &path,
        " TITLE ,AUTHOR,PAGES\nNoli Me Tangere,\"Rizal, Jose\",480\nShort row\n",
    )
    .unwrap();

    let sheet = read_sheet(&path).unwrap();

    assert_eq!(sheet.headers(), ["TITLE", "AUTHOR", "PAGES"]);
    assert_eq!(sheet.len(), 2);
    let first = sheet.row(0).unwrap();
    assert_eq!(first.number(), 1);
    assert_eq!(first.get("AUTHOR"), "Rizal, Jose");
    assert_eq!(first.get("MISSING"), "");
    let second = sheet.row(1).unwrap();
    assert_eq!(second.get("TITLE"), "Short row");
    assert_eq!(second.get("PAGES"), "");
}

#[test]
fn xlsx_written_sheet_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    let mut sheet = Sheet::new(
        vec!["TITLE".into(), "AUTHOR".into()],
        vec![
            vec!["Noli Me Tangere".into(), "Rizal, Jose".into()],
            vec!["Unknown".into(), "".into()],
        ],
    );
    sheet.set(0, "ISBN", "9789712700000");
    sheet.set(1, "ISBN", "Not found");

    write_sheet(&sheet, &path).unwrap();
    let back = read_sheet(&path).unwrap();

    assert_eq!(back.headers(), ["TITLE", "AUTHOR", "ISBN"]);
    assert_eq!(back.column_values("ISBN").unwrap(), vec!["9789712700000", "Not found"]);
    assert_eq!(back.row(1).unwrap().get("AUTHOR"), "");
}

#[test]
fn xlsx_writes_plain_integers_as_numbers() {
    use calamine::{Data, Reader, open_workbook_auto};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    let sheet = Sheet::new(
        vec!["PAGES".into(), "ACCESSION".into(), "ISBN".into(), "CALL NO.".into()],
        vec![vec!["480".into(), "00123".into(), "9780131103627".into(), "QA76".into()]],
    );

    write_sheet(&sheet, &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    assert!(matches!(range.get_value((1, 0)), Some(Data::Float(f)) if *f == 480.0));
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("00123".into())));
    assert_eq!(range.get_value((1, 2)), Some(&Data::String("9780131103627".into())));
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("QA76".into())));

    // Reading back through the sheet layer gives the original text
    let back = read_sheet(&path).unwrap();
    assert_eq!(back.row(0).unwrap().get("PAGES"), "480");
    assert_eq!(back.row(0).unwrap().get("ACCESSION"), "00123");
}

#[test]
fn set_adds_column_once() {
    let mut sheet = Sheet::new(vec!["TITLE".into()], vec![vec!["A".into()], vec!["B".into()]]);
    sheet.set(0, "ISBN", "1");
    sheet.set(1, "ISBN", "2");
    sheet.set(5, "ISBN", "ignored");

    assert_eq!(sheet.headers(), ["TITLE", "ISBN"]);
    assert_eq!(sheet.column_values("ISBN").unwrap(), vec!["1", "2"]);
}

#[test]
fn missing_columns_are_sorted() {
    let sheet = Sheet::new(vec!["TITLE".into(), " ISBN ".into()], vec![]);
    match require_columns(&sheet, REQUIRED_COLUMNS) {
        Err(SheetError::MissingColumns(missing)) => assert_eq!(
            missing,
            vec!["ACCESSION", "AUTHOR", "CALL NO.", "ED./VOL.", "PAGES", "PUBLISHER"]
        ),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_columns_message_lists_names() {
    let err = SheetError::MissingColumns(vec!["ISBN".into(), "PAGES".into()]);
    assert_eq!(err.to_string(), "Missing required columns: ISBN, PAGES");
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holdings.txt");
    std::fs::write(&path, "TITLE\n").unwrap();
    assert!(matches!(
        read_sheet(&path),
        Err(SheetError::UnsupportedFormat(_))
    ));
}

#[test]
fn column_values_of_missing_column_fails() {
    let sheet = Sheet::new(vec!["TITLE".into()], vec![]);
    assert!(matches!(
        sheet.column_values("ISBN"),
        Err(SheetError::MissingColumn(_))
    ));
}
