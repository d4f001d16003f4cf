use holdings_catalog::{
    AuthorKind, AuthorName, PLACEHOLDER_FIRST_NAME, PLACEHOLDER_LAST_NAME,
    PLACEHOLDER_MIDDLE_NAME, parse_authors,
};

fn names(field: &str) -> Vec<AuthorName> {
    parse_authors(field).into_iter().map(|a| a.name).collect()
}

#[test]
fn last_comma_first_with_dotted_initials() {
    let authors = parse_authors("Tolkien, J.R.R.");
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].kind, AuthorKind::Person);
    assert_eq!(authors[0].name.last, "Tolkien");
    // "J.R.R." is longer than a single initial, so it stays the first name.
    assert_eq!(authors[0].name.first, "J.R.R.");
    assert_eq!(authors[0].name.middle, PLACEHOLDER_MIDDLE_NAME);
}

#[test]
fn single_initial_moves_to_middle() {
    let authors = names("Tolkien, J.");
    assert_eq!(
        authors,
        vec![AuthorName::new(PLACEHOLDER_FIRST_NAME, "J.", "Tolkien")]
    );
}

#[test]
fn leading_initial_is_prepended_to_middle_names() {
    let authors = names("J. R. R. Tolkien");
    assert_eq!(
        authors,
        vec![AuthorName::new(PLACEHOLDER_FIRST_NAME, "J. R. R.", "Tolkien")]
    );
}

#[test]
fn two_word_name_without_comma_is_organization() {
    let authors = parse_authors("STI College");
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].kind, AuthorKind::Organization);
    assert_eq!(authors[0].name.last, "STI College");
    assert_eq!(authors[0].name.first, PLACEHOLDER_FIRST_NAME);
    assert_eq!(authors[0].name.middle, PLACEHOLDER_MIDDLE_NAME);
}

#[test]
fn single_word_is_organization() {
    let authors = parse_authors("Microsoft");
    assert_eq!(authors[0].kind, AuthorKind::Organization);
    assert_eq!(authors[0].name.last, "Microsoft");
}

#[test]
fn three_words_split_first_middle_last() {
    assert_eq!(
        names("Robert Cecil Martin"),
        vec![AuthorName::new("Robert", "Cecil", "Martin")]
    );
}

#[test]
fn many_words_keep_remainder_as_middle() {
    assert_eq!(
        names("Maria de la Cruz"),
        vec![AuthorName::new("Maria", "de la", "Cruz")]
    );
}

#[test]
fn comma_form_with_middle_names() {
    assert_eq!(
        names("Kernighan, Brian Wilson"),
        vec![AuthorName::new("Brian", "Wilson", "Kernighan")]
    );
}

#[test]
fn comma_with_no_given_names() {
    assert_eq!(
        names("Aristotle,"),
        vec![AuthorName::new(
            PLACEHOLDER_FIRST_NAME,
            PLACEHOLDER_MIDDLE_NAME,
            "Aristotle"
        )]
    );
}

#[test]
fn comma_with_empty_last_name() {
    assert_eq!(
        names(", John"),
        vec![AuthorName::new("John", PLACEHOLDER_MIDDLE_NAME, PLACEHOLDER_LAST_NAME)]
    );
}

#[test]
fn splits_on_all_separators() {
    let authors = names("Smith, John; Doe, Jane & Roe, Richard\nPoe, Edgar");
    let lasts: Vec<&str> = authors.iter().map(|a| a.last.as_str()).collect();
    assert_eq!(lasts, vec!["Smith", "Doe", "Roe", "Poe"]);
}

#[test]
fn splits_on_and_case_insensitively() {
    let authors = names("Brian W. Kernighan AND Dennis M. Ritchie");
    assert_eq!(
        authors,
        vec![
            AuthorName::new("Brian", "W.", "Kernighan"),
            AuthorName::new("Dennis", "M.", "Ritchie"),
        ]
    );
}

#[test]
fn and_inside_a_word_is_not_a_separator() {
    assert_eq!(
        names("Alexander Graham Bell"),
        vec![AuthorName::new("Alexander", "Graham", "Bell")]
    );
}

#[test]
fn windows_line_breaks_do_not_leave_empty_authors() {
    let authors = names("Smith, John\r\nDoe, Jane");
    assert_eq!(authors.len(), 2);
}

#[test]
fn extra_whitespace_is_collapsed() {
    assert_eq!(
        names("  Robert   Cecil    Martin  "),
        vec![AuthorName::new("Robert", "Cecil", "Martin")]
    );
}

#[test]
fn empty_field_yields_placeholder() {
    for field in ["", "   ", ";", " & and "] {
        let authors = parse_authors(field);
        assert_eq!(authors.len(), 1, "field {field:?}");
        assert_eq!(authors[0].kind, AuthorKind::Placeholder);
        assert_eq!(authors[0].name, AuthorName::placeholder());
    }
}
