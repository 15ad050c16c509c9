//! Library aggregate: inventory, cards, patrons and checkouts.
//!
//! # Responsibility
//! - Hold the per-library inventory (`CheckableAmount` rows).
//! - Hold the cards issued by the library and the loans recorded on them.
//!
//! # Invariants
//! - Library names are unique across the store.
//! - A library has at most one inventory row per checkable ISBN.
//! - A missing inventory row means an amount of zero, never an error.

use crate::model::checkable::Checkable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type PatronId = Uuid;
pub type LibraryCardId = Uuid;

/// How many copies of one checkable a library holds.
///
/// Signed on purpose: the store does not forbid negative counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckableAmount {
    pub checkable: Checkable,
    pub amount: i32,
}

impl CheckableAmount {
    pub fn new(checkable: Checkable, amount: i32) -> Self {
        Self { checkable, amount }
    }
}

/// A person holding library cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    pub id: PatronId,
    pub name: String,
}

impl Patron {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// One active loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub checkable: Checkable,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl Checkout {
    pub fn new(checkable: Checkable, checkout_date: DateTime<Utc>, due_date: DateTime<Utc>) -> Self {
        Self {
            checkable,
            checkout_date,
            due_date,
        }
    }

    /// A checkout due exactly at `now` is not overdue yet.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now
    }
}

/// A patron's membership at one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryCard {
    pub id: LibraryCardId,
    pub patron: Patron,
    /// Kept in the order the loans were recorded.
    pub checkouts: Vec<Checkout>,
}

impl LibraryCard {
    pub fn new(patron: Patron) -> Self {
        Self {
            id: Uuid::new_v4(),
            patron,
            checkouts: Vec::new(),
        }
    }

    pub fn with_checkouts(mut self, checkouts: Vec<Checkout>) -> Self {
        self.checkouts = checkouts;
        self
    }
}

/// Reason a library aggregate cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryValidationError {
    /// Library name is empty after trim.
    BlankName,
    /// The same checkable ISBN appears in more than one inventory row.
    DuplicateInventoryEntry { library: String, isbn: String },
}

impl Display for LibraryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "library name must not be blank"),
            Self::DuplicateInventoryEntry { library, isbn } => write!(
                f,
                "library `{library}` lists checkable `{isbn}` more than once"
            ),
        }
    }
}

impl Error for LibraryValidationError {}

/// A lending library identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    /// Inventory, maintained outside the catalog services.
    pub checkables: Vec<CheckableAmount>,
    /// Cards issued by this library. No ordering guarantee across cards.
    pub library_cards: Vec<LibraryCard>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checkables: Vec::new(),
            library_cards: Vec::new(),
        }
    }

    pub fn with_inventory(mut self, checkables: Vec<CheckableAmount>) -> Self {
        self.checkables = checkables;
        self
    }

    pub fn with_cards(mut self, library_cards: Vec<LibraryCard>) -> Self {
        self.library_cards = library_cards;
        self
    }

    /// Finds the inventory row for `checkable`, matching by ISBN key.
    pub fn inventory_entry(&self, checkable: &Checkable) -> Option<&CheckableAmount> {
        self.checkables
            .iter()
            .find(|entry| entry.checkable.same_item(checkable))
    }

    pub fn validate(&self) -> Result<(), LibraryValidationError> {
        if self.name.trim().is_empty() {
            return Err(LibraryValidationError::BlankName);
        }
        for (index, entry) in self.checkables.iter().enumerate() {
            let repeated = self.checkables[..index]
                .iter()
                .any(|earlier| earlier.checkable.same_item(&entry.checkable));
            if repeated {
                return Err(LibraryValidationError::DuplicateInventoryEntry {
                    library: self.name.clone(),
                    isbn: entry.checkable.isbn.clone(),
                });
            }
        }
        Ok(())
    }
}
