use holdings_catalog::*;

#[test]
fn isbn_separators_are_stripped() {
    assert_eq!(
        normalize_isbn("978-0-13-110362-7"),
        Some("9780131103627".to_string())
    );
    assert_eq!(
        normalize_isbn("ISBN 0 13 110362 8"),
        Some("0131103628".to_string())
    );
}

#[test]
fn isbn_check_character_is_uppercased() {
    assert_eq!(normalize_isbn("0-8044-2957-x"), Some("080442957X".to_string()));
}

#[test]
fn isbn_of_wrong_length_is_absent() {
    for raw in ["12345", "123456789", "12345678901", "123456789012", "12345678901234"] {
        assert_eq!(normalize_isbn(raw), None, "raw {raw:?}");
    }
}

#[test]
fn isbn_lengths_ten_and_thirteen_are_accepted() {
    let ten = "1".repeat(10);
    let thirteen = "9".repeat(13);
    assert_eq!(normalize_isbn(&ten), Some(ten.clone()));
    assert_eq!(normalize_isbn(&thirteen), Some(thirteen.clone()));
}

#[test]
fn isbn_missing_markers_are_not_invalid() {
    for raw in ["", "  ", "Not found", "NONE", "nan", "N/A"] {
        assert_eq!(classify_isbn(raw), IsbnCheck::Missing, "raw {raw:?}");
    }
    assert_eq!(classify_isbn("12-34"), IsbnCheck::Invalid { length: 4 });
}

#[test]
fn isbn_classification_reports_changes() {
    assert_eq!(
        classify_isbn("9780131103627"),
        IsbnCheck::Valid {
            isbn: "9780131103627".to_string(),
            changed: false
        }
    );
    assert_eq!(
        classify_isbn("978-0131103627"),
        IsbnCheck::Valid {
            isbn: "9780131103627".to_string(),
            changed: true
        }
    );
}

#[test]
fn publisher_suffixes_and_abbreviations() {
    assert_eq!(normalize_publisher("Pearson Education, Inc."), "pearson education");
    assert_eq!(normalize_publisher("O'Reilly Media LLC"), "o reilly media");
    assert_eq!(normalize_publisher("Wiley Publishing Ltd"), "wiley publish");
    assert_eq!(
        normalize_publisher("Rex Book Store Corporation"),
        "rex book store corp"
    );
    assert_eq!(normalize_publisher("The MIT Press Limited"), "the mit press");
}

#[test]
fn publisher_replacements_are_whole_word() {
    // "incline" contains "inc" but must survive.
    assert_eq!(normalize_publisher("Incline Village Press"), "incline village press");
    assert_eq!(normalize_publisher("Companyon Books"), "companyon books");
}

#[test]
fn publisher_equivalent_spellings_collapse() {
    let a = normalize_publisher("McGraw-Hill Publishing Company");
    let b = normalize_publisher("mcgraw hill  publishing co.");
    assert_eq!(a, b);
}

#[test]
fn publisher_that_normalizes_to_nothing_is_placeholder() {
    assert_eq!(normalize_publisher(""), PLACEHOLDER_PUBLISHER);
    assert_eq!(normalize_publisher("Inc."), PLACEHOLDER_PUBLISHER);
    assert_eq!(normalize_publisher("---"), PLACEHOLDER_PUBLISHER);
}

#[test]
fn clean_int_parses_plain_numbers() {
    assert_eq!(clean_int("245", 0), Cleaned::Unchanged(245));
    assert_eq!(clean_int(" 12 ", 0), Cleaned::Unchanged(12));
}

#[test]
fn clean_int_extracts_first_digit_run() {
    assert_eq!(clean_int("xii, 245 p.", 0), Cleaned::Modified(245));
    assert_eq!(clean_int("320-340", 0), Cleaned::Modified(320));
    assert_eq!(clean_int("250.0", 0), Cleaned::Modified(250));
}

#[test]
fn clean_int_falls_back_to_default() {
    assert_eq!(clean_int("unknown", 0), Cleaned::Defaulted(0));
    assert_eq!(clean_int("", 7), Cleaned::Defaulted(7));
    assert!(clean_int("n/a", 0).is_defaulted());
}

#[test]
fn clean_text_trims_and_substitutes() {
    assert_eq!(
        clean_text("QA76.73", PLACEHOLDER_CALL_NO),
        Cleaned::Unchanged("QA76.73".to_string())
    );
    assert_eq!(
        clean_text("  QA76.73 ", PLACEHOLDER_CALL_NO),
        Cleaned::Modified("QA76.73".to_string())
    );
    assert_eq!(
        clean_text("   ", PLACEHOLDER_CALL_NO),
        Cleaned::Defaulted(PLACEHOLDER_CALL_NO.to_string())
    );
}

#[test]
fn edition_markers_are_absent() {
    for raw in ["", " ", "None", "N/A", "na", "Not Specified"] {
        assert_eq!(clean_edition(raw), None, "raw {raw:?}");
    }
    assert_eq!(clean_edition(" 2nd ed. "), Some("2nd ed.".to_string()));
    assert_eq!(clean_edition("Vol. 1"), Some("Vol. 1".to_string()));
}

#[test]
fn title_whitespace_is_collapsed() {
    assert_eq!(
        normalize_title("The  C\tProgramming   Language"),
        "The C Programming Language"
    );
}

#[test]
fn accession_placeholder_is_unique_per_row() {
    assert_ne!(placeholder_accession(1), placeholder_accession(2));
    assert_eq!(placeholder_accession(3), "No Accession_3");
}

#[test]
fn placeholder_middle_detection() {
    assert!(is_placeholder_middle(PLACEHOLDER_MIDDLE_NAME));
    assert!(is_placeholder_middle(""));
    assert!(is_placeholder_middle("N/A"));
    assert!(is_placeholder_middle(" no middle name "));
    assert!(!is_placeholder_middle("W."));
    // Real names that merely contain the placeholder text
    assert!(!is_placeholder_middle("Juno Middleton"));
    assert!(!is_placeholder_middle("Bruno Middle"));
}
