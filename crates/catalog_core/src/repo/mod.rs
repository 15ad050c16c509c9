//! Persistence store contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the lookups the catalog services need from storage.
//! - Isolate SQLite query details from service decision logic.
//!
//! # Invariants
//! - Repositories report "no match" as `Ok(None)`, never as an error.
//! - Writes validate records before persistence.

pub mod checkable_repo;
pub mod library_repo;
