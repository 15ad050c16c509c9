//! Checkable use-case service.
//!
//! # Responsibility
//! - Resolve checkables by ISBN or by variant tag.
//! - Register new checkables after a uniqueness check.
//!
//! # Invariants
//! - ISBN keys are unique; `save` rejects a key already in `get_all`.
//! - A missed lookup is `CheckableNotFound`, never an empty success.

use crate::model::checkable::{Checkable, CheckableType};
use crate::repo::checkable_repo::CheckableRepository;
use crate::service::error::{CatalogError, CheckableKey};
use log::{info, warn};

/// Use-case service over a checkable store.
pub struct CheckableService<R: CheckableRepository> {
    repo: R,
}

impl<R: CheckableRepository> CheckableService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every checkable in store order. Empty is a valid result.
    pub fn get_all(&self) -> Result<Vec<Checkable>, CatalogError> {
        Ok(self.repo.find_all()?)
    }

    /// Returns the checkable whose key equals `isbn`.
    ///
    /// # Errors
    /// - `CheckableNotFound` when no record has this key.
    pub fn get_by_isbn(&self, isbn: &str) -> Result<Checkable, CatalogError> {
        match self.repo.find_by_isbn(isbn)? {
            Some(checkable) => Ok(checkable),
            None => {
                warn!("event=checkable_lookup module=service status=not_found by=isbn isbn={isbn}");
                Err(CatalogError::CheckableNotFound(CheckableKey::Isbn(
                    isbn.to_string(),
                )))
            }
        }
    }

    /// Returns the store's representative checkable of variant `kind`.
    ///
    /// This is one item per variant, not a filtered list.
    ///
    /// # Errors
    /// - `CheckableNotFound` when the store holds no checkable of `kind`,
    ///   even if other variants exist.
    pub fn get_by_type(&self, kind: CheckableType) -> Result<Checkable, CatalogError> {
        self.repo.find_by_type(kind)?.ok_or_else(|| {
            warn!("event=checkable_lookup module=service status=not_found by=type kind={kind}");
            CatalogError::CheckableNotFound(CheckableKey::Type(kind))
        })
    }

    /// Persists a new checkable.
    ///
    /// # Errors
    /// - `ResourceAlreadyExists` when any stored checkable has the same ISBN.
    pub fn save(&self, checkable: &Checkable) -> Result<(), CatalogError> {
        let existing = self.get_all()?;
        if existing.iter().any(|stored| stored.same_item(checkable)) {
            warn!(
                "event=checkable_save module=service status=rejected reason=duplicate isbn={}",
                checkable.isbn
            );
            return Err(CatalogError::ResourceAlreadyExists(format!(
                "checkable with isbn `{}` already exists",
                checkable.isbn
            )));
        }

        self.repo.save(checkable)?;
        info!(
            "event=checkable_save module=service status=ok isbn={} kind={}",
            checkable.isbn,
            checkable.kind()
        );
        Ok(())
    }
}
