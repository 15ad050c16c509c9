//! Core business logic for the library catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::checkable::{
    Checkable, CheckableItem, CheckableType, CheckableValidationError, MediaType,
};
pub use model::library::{
    CheckableAmount, Checkout, Library, LibraryCard, LibraryCardId, LibraryValidationError,
    Patron, PatronId,
};
pub use model::view::{LibraryAvailableCheckouts, OverdueCheckout};
pub use repo::checkable_repo::{
    CheckableRepository, RepoError, RepoResult, SqliteCheckableRepository,
};
pub use repo::library_repo::{LibraryRepository, SqliteLibraryRepository};
pub use service::checkable_service::CheckableService;
pub use service::error::{CatalogError, CheckableKey};
pub use service::library_service::LibraryService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
