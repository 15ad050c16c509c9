//! Checkable domain model.
//!
//! # Responsibility
//! - Define every item kind a library can lend out.
//! - Provide the explicit variant tag used for by-type lookups.
//!
//! # Invariants
//! - `isbn` is the identity key and is unique across all checkables.
//! - Two checkables are the same item iff their `isbn` values match.
//! - A checkable is never mutated after it has been saved.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Media format for `CheckableItem::Media`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Book,
    Music,
    Video,
}

/// Fieldless discriminator of `CheckableItem`.
///
/// Used wherever a caller needs "a ticket" rather than a specific ISBN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckableType {
    Media,
    ScienceKit,
    Ticket,
}

impl Display for CheckableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Media => "media",
            Self::ScienceKit => "science_kit",
            Self::Ticket => "ticket",
        };
        f.write_str(label)
    }
}

/// Variant-specific payload of a checkable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckableItem {
    /// Book, album or film.
    Media {
        title: String,
        /// Author for books, artist for music and video.
        author: String,
        media_type: MediaType,
    },
    /// Hands-on science kit.
    ScienceKit { name: String },
    /// Admission ticket or pass.
    Ticket { name: String },
}

/// Any item a library lends out, keyed by an ISBN-like string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkable {
    pub isbn: String,
    #[serde(flatten)]
    pub item: CheckableItem,
}

/// Validation failures for checkable records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckableValidationError {
    /// ISBN key is empty after trim.
    BlankIsbn,
    /// Title (media) or name (kit, ticket) is empty after trim.
    BlankName { isbn: String },
}

impl Display for CheckableValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankIsbn => write!(f, "checkable isbn must not be blank"),
            Self::BlankName { isbn } => {
                write!(f, "checkable `{isbn}` must have a non-blank title or name")
            }
        }
    }
}

impl Error for CheckableValidationError {}

impl Checkable {
    pub fn new(isbn: impl Into<String>, item: CheckableItem) -> Self {
        Self {
            isbn: isbn.into(),
            item,
        }
    }

    pub fn media(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        media_type: MediaType,
    ) -> Self {
        Self::new(
            isbn,
            CheckableItem::Media {
                title: title.into(),
                author: author.into(),
                media_type,
            },
        )
    }

    pub fn science_kit(isbn: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(isbn, CheckableItem::ScienceKit { name: name.into() })
    }

    pub fn ticket(isbn: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(isbn, CheckableItem::Ticket { name: name.into() })
    }

    /// Returns the variant tag of this checkable.
    pub fn kind(&self) -> CheckableType {
        match self.item {
            CheckableItem::Media { .. } => CheckableType::Media,
            CheckableItem::ScienceKit { .. } => CheckableType::ScienceKit,
            CheckableItem::Ticket { .. } => CheckableType::Ticket,
        }
    }

    /// Display title: media title, or kit/ticket name.
    pub fn title(&self) -> &str {
        match &self.item {
            CheckableItem::Media { title, .. } => title,
            CheckableItem::ScienceKit { name } | CheckableItem::Ticket { name } => name,
        }
    }

    /// Key-based identity used by inventory lookups.
    pub fn same_item(&self, other: &Checkable) -> bool {
        self.isbn == other.isbn
    }

    /// Checks the record can be persisted.
    pub fn validate(&self) -> Result<(), CheckableValidationError> {
        if self.isbn.trim().is_empty() {
            return Err(CheckableValidationError::BlankIsbn);
        }
        if self.title().trim().is_empty() {
            return Err(CheckableValidationError::BlankName {
                isbn: self.isbn.clone(),
            });
        }
        Ok(())
    }
}
