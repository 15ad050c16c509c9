//! Read-only projections assembled per query.

use crate::model::library::{Checkout, Patron};
use serde::{Deserialize, Serialize};

/// One library that currently holds copies of a requested checkable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryAvailableCheckouts {
    pub amount: i32,
    pub library_name: String,
}

impl LibraryAvailableCheckouts {
    pub fn new(amount: i32, library_name: impl Into<String>) -> Self {
        Self {
            amount,
            library_name: library_name.into(),
        }
    }
}

/// A loan past its due date, paired with the patron who holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueCheckout {
    pub patron: Patron,
    pub checkout: Checkout,
}

impl OverdueCheckout {
    pub fn new(patron: Patron, checkout: Checkout) -> Self {
        Self { patron, checkout }
    }
}
