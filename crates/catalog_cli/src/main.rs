//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `catalog_core` linkage against a real SQLite store.
//! - Seed a demonstration catalog on first run and print derived queries.
//!
//! Usage: `catalog_cli [db_path] [log_dir]`. Without `db_path` the catalog
//! lives in memory; without `log_dir` logging stays off.

use catalog_core::db::{open_db, open_db_in_memory};
use catalog_core::{
    default_log_level, init_logging, CatalogError, Checkable, CheckableAmount, CheckableService,
    Checkout, Library, LibraryCard, LibraryService, MediaType, Patron, SqliteCheckableRepository,
    SqliteLibraryRepository,
};
use chrono::{Duration, Utc};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const DEMO_ISBN: &str = "1-0";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("catalog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    if let Some(log_dir) = args.next() {
        init_logging(default_log_level(), &log_dir)?;
    }

    println!("catalog_core ping={}", catalog_core::ping());
    println!("catalog_core version={}", catalog_core::core_version());

    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = LibraryService::new(
        SqliteLibraryRepository::new(&conn),
        CheckableService::new(SqliteCheckableRepository::new(&conn)),
    );

    if service.get_libraries()?.is_empty() {
        seed_demo_catalog(&service)?;
        info!("event=demo_seed module=cli status=ok");
    }

    for entry in service.get_libraries_with_available_checkout(DEMO_ISBN)? {
        println!(
            "available isbn={DEMO_ISBN} library={} amount={}",
            entry.library_name, entry.amount
        );
    }

    if let Some(first) = service.get_libraries()?.first() {
        let overdue = service.get_overdue_checkouts(&first.name)?;
        println!("overdue library={} count={}", first.name, overdue.len());
        for entry in overdue {
            println!(
                "overdue isbn={} due={}",
                entry.checkout.checkable.isbn,
                entry.checkout.due_date.to_rfc3339()
            );
        }
    }

    Ok(())
}

fn seed_demo_catalog(
    service: &LibraryService<SqliteLibraryRepository<'_>, SqliteCheckableRepository<'_>>,
) -> Result<(), CatalogError> {
    let checkables = [
        Checkable::media(DEMO_ISBN, "The White Whale", "Melvin H", MediaType::Book),
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
    ];
    for checkable in &checkables {
        service.checkable_service().save(checkable)?;
    }

    let now = Utc::now();
    let card = LibraryCard::new(Patron::new("Ana")).with_checkouts(vec![
        Checkout::new(
            checkables[1].clone(),
            now - Duration::days(15),
            now - Duration::days(1),
        ),
        Checkout::new(
            checkables[5].clone(),
            now - Duration::days(6),
            now + Duration::days(1),
        ),
    ]);

    service.save(
        &Library::new("Downtown")
            .with_inventory(vec![
                CheckableAmount::new(checkables[0].clone(), 3),
                CheckableAmount::new(checkables[6].clone(), 20),
            ])
            .with_cards(vec![card]),
    )?;
    service.save(&Library::new("Eastside").with_inventory(vec![
        CheckableAmount::new(checkables[0].clone(), 1),
        CheckableAmount::new(checkables[4].clone(), 2),
    ]))?;
    Ok(())
}
