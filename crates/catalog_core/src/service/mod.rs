//! Catalog use-case services.
//!
//! # Responsibility
//! - Own the lookup, duplicate-detection and derived-query rules.
//! - Keep callers decoupled from storage details.

pub mod checkable_service;
pub mod error;
pub mod library_service;
