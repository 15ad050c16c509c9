//! Catalog domain model.
//!
//! # Responsibility
//! - Define the records the catalog services read and assemble.
//! - Keep variant dispatch explicit through `CheckableItem`/`CheckableType`.
//!
//! # Invariants
//! - Checkables are identified by ISBN, libraries by name.
//! - View objects are built fresh per query and never persisted.

pub mod checkable;
pub mod library;
pub mod view;
