use holdings_catalog::types::*;
use holdings_db::*;

fn new_book(title: &str, publisher_id: i64) -> NewBook {
    NewBook {
        title: title.to_string(),
        publisher_id,
        pages: 272,
        isbn: None,
        cover_image: None,
        edition: None,
    }
}

#[test]
fn publisher_insert_and_find() {
    let conn = open_memory().unwrap();
    let id = insert_publisher(&conn, "prentice hall").unwrap();

    assert_eq!(find_publisher_by_name(&conn, "prentice hall").unwrap(), Some(id));
    assert_eq!(find_publisher_by_name(&conn, "Prentice Hall").unwrap(), None);
}

#[test]
fn publisher_names_are_unique() {
    let conn = open_memory().unwrap();
    insert_publisher(&conn, "rex").unwrap();
    assert!(insert_publisher(&conn, "rex").is_err());
}

#[test]
fn author_exact_and_partial_lookup() {
    let conn = open_memory().unwrap();
    let name = AuthorName::new("Brian", "W.", "Kernighan");
    let id = insert_author(&conn, &name).unwrap();

    assert_eq!(find_author_exact(&conn, &name).unwrap(), Some(id));
    assert_eq!(
        find_author_exact(&conn, &AuthorName::new("Brian", "Wilson", "Kernighan")).unwrap(),
        None
    );

    let found = find_author_by_first_last(&conn, "Brian", "Kernighan")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.middle_name, "W.");
}

#[test]
fn author_middle_update() {
    let conn = open_memory().unwrap();
    let id = insert_author(&conn, &AuthorName::new("Dennis", PLACEHOLDER_MIDDLE_NAME, "Ritchie"))
        .unwrap();
    update_author_middle(&conn, id, "M.").unwrap();

    let found = find_author_by_first_last(&conn, "Dennis", "Ritchie")
        .unwrap()
        .unwrap();
    assert_eq!(found.middle_name, "M.");

    assert!(matches!(
        update_author_middle(&conn, id + 100, "X."),
        Err(OperationError::NotFound { .. })
    ));
}

#[test]
fn book_lookup_by_isbn() {
    let conn = open_memory().unwrap();
    let publisher = insert_publisher(&conn, "prentice hall").unwrap();
    let mut book = new_book("The C Programming Language", publisher);
    book.isbn = Some("9780131103627".to_string());
    let id = insert_book(&conn, &book).unwrap();

    let found = find_book_by_isbn(&conn, "9780131103627").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.title, "The C Programming Language");
    assert_eq!(found.pages, 272);
    assert!(find_book_by_isbn(&conn, "0000000000").unwrap().is_none());
}

#[test]
fn book_lookup_by_title_publisher_edition_treats_null_as_empty() {
    let conn = open_memory().unwrap();
    let publisher = insert_publisher(&conn, "prentice hall").unwrap();
    let plain = insert_book(&conn, &new_book("Operating Systems", publisher)).unwrap();

    let mut second = new_book("Operating Systems", publisher);
    second.edition = Some("2nd ed.".to_string());
    let second_id = insert_book(&conn, &second).unwrap();

    let found = find_book_by_title_publisher_edition(&conn, "Operating Systems", publisher, None)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, plain);

    let found = find_book_by_title_publisher_edition(
        &conn,
        "Operating Systems",
        publisher,
        Some("2nd ed."),
    )
    .unwrap()
    .unwrap();
    assert_eq!(found.id, second_id);

    assert!(
        find_book_by_title_publisher_edition(&conn, "Operating Systems", publisher + 1, None)
            .unwrap()
            .is_none()
    );
}

#[test]
fn absent_book_fields_are_stored_as_null() {
    let conn = open_memory().unwrap();
    let publisher = insert_publisher(&conn, "rex").unwrap();
    let id = insert_book(&conn, &new_book("Filipino Grammar", publisher)).unwrap();

    let (isbn, cover, edition): (Option<String>, Option<String>, Option<String>) = conn
        .query_row(
            "SELECT isbn, cover_image, edition FROM books WHERE book_id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!((isbn, cover, edition), (None, None, None));
}

#[test]
fn copies_start_available_and_accessions_are_unique() {
    let conn = open_memory().unwrap();
    let publisher = insert_publisher(&conn, "rex").unwrap();
    let book = insert_book(&conn, &new_book("Filipino Grammar", publisher)).unwrap();

    let copy = NewBookCopy {
        book_id: book,
        accession_no: "A-0001".to_string(),
        call_no: "PL6053".to_string(),
        edition: None,
    };
    insert_book_copy(&conn, &copy).unwrap();
    assert!(insert_book_copy(&conn, &copy).is_err());

    let copies = copies_for_book(&conn, book).unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].status, COPY_STATUS_AVAILABLE);
}

#[test]
fn author_links_are_idempotent_and_ordered() {
    let conn = open_memory().unwrap();
    let publisher = insert_publisher(&conn, "prentice hall").unwrap();
    let book = insert_book(&conn, &new_book("The C Programming Language", publisher)).unwrap();
    let k = insert_author(&conn, &AuthorName::new("Brian", "W.", "Kernighan")).unwrap();
    let r = insert_author(&conn, &AuthorName::new("Dennis", "M.", "Ritchie")).unwrap();

    assert!(link_author(&conn, book, k, 1).unwrap());
    assert!(link_author(&conn, book, r, 2).unwrap());
    assert!(!link_author(&conn, book, k, 3).unwrap());

    let authors = authors_for_book(&conn, book).unwrap();
    let lasts: Vec<(&str, i64)> = authors
        .iter()
        .map(|a| (a.author.last_name.as_str(), a.author_order))
        .collect();
    assert_eq!(lasts, vec![("Kernighan", 1), ("Ritchie", 2)]);
}

#[test]
fn books_require_an_existing_publisher() {
    let conn = open_memory().unwrap();
    assert!(insert_book(&conn, &new_book("Orphan", 42)).is_err());
}
