//! Library use-case service.
//!
//! # Responsibility
//! - Resolve and register libraries.
//! - Derive per-library amounts, cross-library availability and overdue
//!   checkouts from stored aggregates.
//!
//! # Invariants
//! - Library names are unique; `save` rejects a name already in
//!   `get_libraries`.
//! - A missing inventory row yields an amount of zero, never an error.
//! - Availability keeps every library whose amount is non-zero, negative
//!   amounts included.
//! - Overdue means `due_date < now`, with `now` read once per call.

use crate::clock::{Clock, SystemClock};
use crate::model::checkable::Checkable;
use crate::model::library::{CheckableAmount, Library};
use crate::model::view::{LibraryAvailableCheckouts, OverdueCheckout};
use crate::repo::checkable_repo::CheckableRepository;
use crate::repo::library_repo::LibraryRepository;
use crate::service::checkable_service::CheckableService;
use crate::service::error::CatalogError;
use log::{debug, info, warn};

/// Use-case service over a library store and the checkable service.
pub struct LibraryService<L, C, K = SystemClock>
where
    L: LibraryRepository,
    C: CheckableRepository,
    K: Clock,
{
    repo: L,
    checkables: CheckableService<C>,
    clock: K,
}

impl<L, C> LibraryService<L, C, SystemClock>
where
    L: LibraryRepository,
    C: CheckableRepository,
{
    /// Creates a service that reads wall-clock time for overdue checks.
    pub fn new(repo: L, checkables: CheckableService<C>) -> Self {
        Self::with_clock(repo, checkables, SystemClock)
    }
}

impl<L, C, K> LibraryService<L, C, K>
where
    L: LibraryRepository,
    C: CheckableRepository,
    K: Clock,
{
    /// Creates a service with an injected time source.
    pub fn with_clock(repo: L, checkables: CheckableService<C>, clock: K) -> Self {
        Self {
            repo,
            checkables,
            clock,
        }
    }

    /// Checkable service used for ISBN resolution.
    pub fn checkable_service(&self) -> &CheckableService<C> {
        &self.checkables
    }

    /// Returns every library in store order.
    pub fn get_libraries(&self) -> Result<Vec<Library>, CatalogError> {
        Ok(self.repo.find_all()?)
    }

    /// Returns the library named exactly `name`.
    ///
    /// Falls back to a full scan of `get_libraries` when the direct store
    /// lookup reports no match.
    ///
    /// # Errors
    /// - `LibraryNotFound` when neither path matches.
    pub fn get_library_by_name(&self, name: &str) -> Result<Library, CatalogError> {
        if let Some(library) = self.repo.find_by_name(name)? {
            return Ok(library);
        }

        debug!("event=library_lookup module=service status=fallback_scan name={name}");
        self.get_libraries()?
            .into_iter()
            .find(|library| library.name == name)
            .ok_or_else(|| {
                warn!("event=library_lookup module=service status=not_found name={name}");
                CatalogError::LibraryNotFound(name.to_string())
            })
    }

    /// Persists a new library.
    ///
    /// # Errors
    /// - `ResourceAlreadyExists` when a stored library has the same name.
    pub fn save(&self, library: &Library) -> Result<(), CatalogError> {
        let libraries = self.get_libraries()?;
        if libraries.iter().any(|stored| stored.name == library.name) {
            warn!(
                "event=library_save module=service status=rejected reason=duplicate name={}",
                library.name
            );
            return Err(CatalogError::ResourceAlreadyExists(format!(
                "library with name `{}` already exists",
                library.name
            )));
        }

        self.repo.save(library)?;
        info!(
            "event=library_save module=service status=ok name={} inventory_rows={} cards={}",
            library.name,
            library.checkables.len(),
            library.library_cards.len()
        );
        Ok(())
    }

    /// Returns how many copies of `isbn` the library holds.
    ///
    /// # Errors
    /// - `LibraryNotFound` for an unknown library.
    /// - `CheckableNotFound` for an unregistered ISBN.
    pub fn get_checkable_amount(
        &self,
        library_name: &str,
        isbn: &str,
    ) -> Result<CheckableAmount, CatalogError> {
        let library = self.get_library_by_name(library_name)?;
        let checkable = self.checkables.get_by_isbn(isbn)?;
        Ok(amount_in(&library, checkable))
    }

    /// Same as `get_checkable_amount` for an already resolved checkable.
    ///
    /// # Errors
    /// - `LibraryNotFound` for an unknown library.
    pub fn get_checkable_amount_for(
        &self,
        library_name: &str,
        checkable: &Checkable,
    ) -> Result<CheckableAmount, CatalogError> {
        let library = self.get_library_by_name(library_name)?;
        Ok(amount_in(&library, checkable.clone()))
    }

    /// Lists libraries holding a non-zero amount of `isbn`, in store order.
    ///
    /// # Errors
    /// - `CheckableNotFound` when `isbn` is unregistered, regardless of
    ///   any inventory rows referencing it.
    pub fn get_libraries_with_available_checkout(
        &self,
        isbn: &str,
    ) -> Result<Vec<LibraryAvailableCheckouts>, CatalogError> {
        let checkable = self.checkables.get_by_isbn(isbn)?;
        let mut available = Vec::new();
        for library in self.get_libraries()? {
            let entry = self.get_checkable_amount_for(&library.name, &checkable)?;
            if entry.amount != 0 {
                available.push(LibraryAvailableCheckouts::new(entry.amount, library.name));
            }
        }
        Ok(available)
    }

    /// Lists every checkout at the library whose due date has passed.
    ///
    /// Cards are visited in store order, checkouts in card order. Callers
    /// must not rely on ordering across cards.
    ///
    /// # Errors
    /// - `LibraryNotFound` for an unknown library.
    pub fn get_overdue_checkouts(
        &self,
        library_name: &str,
    ) -> Result<Vec<OverdueCheckout>, CatalogError> {
        let library = self.get_library_by_name(library_name)?;
        let now = self.clock.now();

        let overdue: Vec<OverdueCheckout> = library
            .library_cards
            .into_iter()
            .flat_map(|card| {
                let patron = card.patron;
                card.checkouts
                    .into_iter()
                    .filter(move |checkout| checkout.is_overdue_at(now))
                    .map(move |checkout| OverdueCheckout::new(patron.clone(), checkout))
            })
            .collect();

        debug!(
            "event=overdue_query module=service status=ok library={library_name} overdue={}",
            overdue.len()
        );
        Ok(overdue)
    }
}

fn amount_in(library: &Library, checkable: Checkable) -> CheckableAmount {
    match library.inventory_entry(&checkable) {
        Some(entry) => entry.clone(),
        None => CheckableAmount::new(checkable, 0),
    }
}
