use catalog_core::db::open_db_in_memory;
use catalog_core::{
    CatalogError, Checkable, CheckableKey, CheckableRepository, CheckableService, CheckableType,
    MediaType, RepoError, RepoResult, SqliteCheckableRepository,
};

fn fixture_checkables() -> Vec<Checkable> {
    vec![
        Checkable::media("1-0", "The White Whale", "Melvin H", MediaType::Book),
        Checkable::media("1-1", "The Sorcerer's Quest", "Ana T", MediaType::Book),
        Checkable::media(
            "1-2",
            "When You're Gone",
            "Complaining at the Disco",
            MediaType::Music,
        ),
        Checkable::media("1-3", "Nature Around the World", "DocuSpecialists", MediaType::Video),
        Checkable::science_kit("2-0", "Anatomy Model"),
        Checkable::science_kit("2-1", "Robotics Kit"),
        Checkable::ticket("3-0", "Science Museum Tickets"),
        Checkable::ticket("3-1", "National Park Day Pass"),
    ]
}

fn seeded_service(
    conn: &rusqlite::Connection,
) -> CheckableService<SqliteCheckableRepository<'_>> {
    let service = CheckableService::new(SqliteCheckableRepository::new(conn));
    for checkable in fixture_checkables() {
        service.save(&checkable).unwrap();
    }
    service
}

#[test]
fn get_all_returns_every_checkable_in_store_order() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let all = service.get_all().unwrap();
    assert_eq!(all.len(), 8);
    assert_eq!(all, fixture_checkables());
}

#[test]
fn get_all_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = CheckableService::new(SqliteCheckableRepository::new(&conn));
    assert!(service.get_all().unwrap().is_empty());
}

#[test]
fn get_by_isbn_returns_matching_checkable() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let expected = fixture_checkables()[4].clone();
    assert_eq!(service.get_by_isbn("2-0").unwrap(), expected);
}

#[test]
fn get_by_isbn_unknown_key_is_checkable_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let err = service.get_by_isbn("Non-Existent Checkable").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::CheckableNotFound(CheckableKey::Isbn(ref isbn)) if isbn == "Non-Existent Checkable"
    ));
    assert!(err.is_not_found());
}

#[test]
fn get_by_type_returns_one_representative_per_variant() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let ticket = service.get_by_type(CheckableType::Ticket).unwrap();
    assert_eq!(ticket.kind(), CheckableType::Ticket);
    assert_eq!(ticket.isbn, "3-0");

    let kit = service.get_by_type(CheckableType::ScienceKit).unwrap();
    assert_eq!(kit.kind(), CheckableType::ScienceKit);
}

#[test]
fn get_by_type_missing_variant_is_not_found_even_when_others_exist() {
    let conn = open_db_in_memory().unwrap();
    let service = CheckableService::new(SqliteCheckableRepository::new(&conn));
    service
        .save(&Checkable::media("1-0", "The White Whale", "Melvin H", MediaType::Book))
        .unwrap();
    service
        .save(&Checkable::ticket("3-0", "Science Museum Tickets"))
        .unwrap();

    let err = service.get_by_type(CheckableType::ScienceKit).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::CheckableNotFound(CheckableKey::Type(CheckableType::ScienceKit))
    ));
}

#[test]
fn save_then_get_by_isbn_returns_saved_checkable() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let new_items = [
        Checkable::media("8-4", "More on Coding", "Dominick Barnes", MediaType::Book),
        Checkable::media("8-2", "Jacoco test report", "Kevin Monitor", MediaType::Music),
        Checkable::media("8-3", "Back to the... wait", "Thom the bomb", MediaType::Video),
    ];
    for item in &new_items {
        service.save(item).unwrap();
    }

    for item in &new_items {
        assert_eq!(&service.get_by_isbn(&item.isbn).unwrap(), item);
    }
    assert_eq!(service.get_all().unwrap().len(), 11);
}

#[test]
fn save_existing_isbn_is_resource_already_exists() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let err = service
        .save(&Checkable::media(
            "1-1",
            "The Sorcerer's Quest",
            "Ana T",
            MediaType::Book,
        ))
        .unwrap_err();
    assert!(matches!(err, CatalogError::ResourceAlreadyExists(_)));
    assert!(!err.is_not_found());
    assert_eq!(service.get_all().unwrap().len(), 8);
}

#[test]
fn save_rejects_duplicate_key_even_with_different_payload() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let err = service
        .save(&Checkable::ticket("2-0", "Not An Anatomy Model"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::ResourceAlreadyExists(message) if message.contains("2-0")));
}

struct UnavailableStore;

impl CheckableRepository for UnavailableStore {
    fn find_all(&self) -> RepoResult<Vec<Checkable>> {
        Err(RepoError::InvalidData("store offline".to_string()))
    }

    fn find_by_isbn(&self, _isbn: &str) -> RepoResult<Option<Checkable>> {
        Err(RepoError::InvalidData("store offline".to_string()))
    }

    fn find_by_type(&self, _kind: CheckableType) -> RepoResult<Option<Checkable>> {
        Err(RepoError::InvalidData("store offline".to_string()))
    }

    fn save(&self, _checkable: &Checkable) -> RepoResult<()> {
        Err(RepoError::InvalidData("store offline".to_string()))
    }
}

#[test]
fn store_failures_pass_through_unchanged() {
    let service = CheckableService::new(UnavailableStore);

    for err in [
        service.get_all().unwrap_err(),
        service.get_by_isbn("1-0").unwrap_err(),
        service.get_by_type(CheckableType::Ticket).unwrap_err(),
        service
            .save(&Checkable::ticket("3-9", "Zoo Pass"))
            .unwrap_err(),
    ] {
        assert!(matches!(err, CatalogError::Repo(RepoError::InvalidData(ref m)) if m == "store offline"));
    }
}
