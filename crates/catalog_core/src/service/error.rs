//! Error surface of the catalog services.

use crate::model::checkable::CheckableType;
use crate::repo::checkable_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key used for a checkable lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckableKey {
    Isbn(String),
    Type(CheckableType),
}

impl Display for CheckableKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isbn(isbn) => write!(f, "isbn `{isbn}`"),
            Self::Type(kind) => write!(f, "type `{kind}`"),
        }
    }
}

/// Errors returned by `CheckableService` and `LibraryService`.
#[derive(Debug)]
pub enum CatalogError {
    /// No library with this name, by direct lookup or full scan.
    LibraryNotFound(String),
    /// No checkable for the requested ISBN or variant.
    CheckableNotFound(CheckableKey),
    /// A record with the same unique key is already stored.
    ResourceAlreadyExists(String),
    /// Store failure, passed through unchanged.
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LibraryNotFound(name) => {
                write!(f, "library with the name `{name}` was not found")
            }
            Self::CheckableNotFound(key) => write!(f, "checkable with {key} was not found"),
            Self::ResourceAlreadyExists(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl CatalogError {
    /// Whether the failure means a lookup target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LibraryNotFound(_) | Self::CheckableNotFound(_)
        )
    }
}
