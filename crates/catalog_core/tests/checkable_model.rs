use catalog_core::{
    Checkable, CheckableAmount, CheckableItem, CheckableType, CheckableValidationError, Library,
    LibraryValidationError, MediaType,
};

#[test]
fn constructors_set_variant_and_kind() {
    let book = Checkable::media("1-0", "The White Whale", "Melvin H", MediaType::Book);
    let kit = Checkable::science_kit("2-0", "Anatomy Model");
    let ticket = Checkable::ticket("3-0", "Science Museum Tickets");

    assert_eq!(book.kind(), CheckableType::Media);
    assert_eq!(kit.kind(), CheckableType::ScienceKit);
    assert_eq!(ticket.kind(), CheckableType::Ticket);
    assert_eq!(book.title(), "The White Whale");
    assert_eq!(kit.title(), "Anatomy Model");
    assert!(matches!(
        book.item,
        CheckableItem::Media {
            media_type: MediaType::Book,
            ..
        }
    ));
}

#[test]
fn same_item_compares_isbn_only() {
    let original = Checkable::media("1-1", "The Sorcerer's Quest", "Ana T", MediaType::Book);
    let renamed = Checkable::media("1-1", "Another Title", "Someone", MediaType::Video);
    let other = Checkable::media("1-2", "The Sorcerer's Quest", "Ana T", MediaType::Book);

    assert!(original.same_item(&renamed));
    assert!(!original.same_item(&other));
}

#[test]
fn validate_rejects_blank_isbn_and_name() {
    assert_eq!(
        Checkable::ticket("  ", "Day Pass").validate(),
        Err(CheckableValidationError::BlankIsbn)
    );
    assert_eq!(
        Checkable::science_kit("2-9", " ").validate(),
        Err(CheckableValidationError::BlankName {
            isbn: "2-9".to_string()
        })
    );
    assert!(Checkable::ticket("3-1", "National Park Day Pass")
        .validate()
        .is_ok());
}

#[test]
fn library_validate_rejects_blank_name_and_repeated_inventory() {
    assert_eq!(
        Library::new("").validate(),
        Err(LibraryValidationError::BlankName)
    );

    let kit = Checkable::science_kit("2-1", "Robotics Kit");
    let library = Library::new("Eastside").with_inventory(vec![
        CheckableAmount::new(kit.clone(), 2),
        CheckableAmount::new(kit, 4),
    ]);
    assert_eq!(
        library.validate(),
        Err(LibraryValidationError::DuplicateInventoryEntry {
            library: "Eastside".to_string(),
            isbn: "2-1".to_string(),
        })
    );
}

#[test]
fn checkable_serialization_uses_type_tag_next_to_isbn() {
    let song = Checkable::media(
        "1-2",
        "When You're Gone",
        "Complaining at the Disco",
        MediaType::Music,
    );

    let json = serde_json::to_value(&song).unwrap();
    assert_eq!(json["isbn"], "1-2");
    assert_eq!(json["type"], "media");
    assert_eq!(json["media_type"], "music");
    assert_eq!(json["author"], "Complaining at the Disco");

    let decoded: Checkable = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, song);

    let ticket = serde_json::to_value(Checkable::ticket("3-0", "Science Museum Tickets")).unwrap();
    assert_eq!(ticket["type"], "ticket");
    assert_eq!(ticket["name"], "Science Museum Tickets");
}
