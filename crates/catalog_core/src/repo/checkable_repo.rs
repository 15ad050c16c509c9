//! Checkable store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup by ISBN, by variant tag, full scan and insert.
//! - Keep SQL and column mapping for `checkables` inside this module.
//!
//! # Invariants
//! - `find_all` returns rows in insertion order.
//! - `find_by_type` returns the earliest inserted checkable of that variant.
//! - Writes call `Checkable::validate()` before any SQL mutation.

use crate::db::DbError;
use crate::model::checkable::{
    Checkable, CheckableItem, CheckableType, CheckableValidationError, MediaType,
};
use crate::model::library::LibraryValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CHECKABLE_COLUMNS: &str = "isbn, kind, title, author, media_type, name";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error shared by all catalog repositories.
#[derive(Debug)]
pub enum RepoError {
    InvalidCheckable(CheckableValidationError),
    InvalidLibrary(LibraryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCheckable(err) => write!(f, "{err}"),
            Self::InvalidLibrary(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCheckable(err) => Some(err),
            Self::InvalidLibrary(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<CheckableValidationError> for RepoError {
    fn from(value: CheckableValidationError) -> Self {
        Self::InvalidCheckable(value)
    }
}

impl From<LibraryValidationError> for RepoError {
    fn from(value: LibraryValidationError) -> Self {
        Self::InvalidLibrary(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for checkables.
pub trait CheckableRepository {
    fn find_all(&self) -> RepoResult<Vec<Checkable>>;
    fn find_by_isbn(&self, isbn: &str) -> RepoResult<Option<Checkable>>;
    /// Returns one representative checkable of the given variant.
    fn find_by_type(&self, kind: CheckableType) -> RepoResult<Option<Checkable>>;
    fn save(&self, checkable: &Checkable) -> RepoResult<()>;
}

/// SQLite-backed checkable repository.
pub struct SqliteCheckableRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCheckableRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CheckableRepository for SqliteCheckableRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Checkable>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CHECKABLE_COLUMNS} FROM checkables ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut checkables = Vec::new();
        while let Some(row) = rows.next()? {
            checkables.push(parse_checkable_row(row)?);
        }
        Ok(checkables)
    }

    fn find_by_isbn(&self, isbn: &str) -> RepoResult<Option<Checkable>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CHECKABLE_COLUMNS} FROM checkables WHERE isbn = ?1;"
        ))?;
        let mut rows = stmt.query([isbn])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_checkable_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_by_type(&self, kind: CheckableType) -> RepoResult<Option<Checkable>> {
        let isbn: Option<String> = self
            .conn
            .query_row(
                "SELECT isbn FROM checkables WHERE kind = ?1 ORDER BY rowid ASC LIMIT 1;",
                [checkable_type_to_db(kind)],
                |row| row.get(0),
            )
            .optional()?;
        match isbn {
            Some(isbn) => self.find_by_isbn(&isbn),
            None => Ok(None),
        }
    }

    fn save(&self, checkable: &Checkable) -> RepoResult<()> {
        checkable.validate()?;

        let (title, author, media_type, name) = match &checkable.item {
            CheckableItem::Media {
                title,
                author,
                media_type,
            } => (
                Some(title.as_str()),
                Some(author.as_str()),
                Some(media_type_to_db(*media_type)),
                None,
            ),
            CheckableItem::ScienceKit { name } | CheckableItem::Ticket { name } => {
                (None, None, None, Some(name.as_str()))
            }
        };

        self.conn.execute(
            "INSERT INTO checkables (isbn, kind, title, author, media_type, name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                checkable.isbn.as_str(),
                checkable_type_to_db(checkable.kind()),
                title,
                author,
                media_type,
                name,
            ],
        )?;
        Ok(())
    }
}

/// Maps one row exposing the `CHECKABLE_COLUMNS` names.
pub(crate) fn parse_checkable_row(row: &Row<'_>) -> RepoResult<Checkable> {
    let isbn: String = row.get("isbn")?;
    let kind_text: String = row.get("kind")?;
    let kind = parse_checkable_type(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid checkable kind `{kind_text}` for `{isbn}`"))
    })?;

    let item = match kind {
        CheckableType::Media => {
            let media_text: Option<String> = row.get("media_type")?;
            let media_type = media_text
                .as_deref()
                .and_then(parse_media_type)
                .ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "invalid media type `{}` for `{isbn}`",
                        media_text.as_deref().unwrap_or("NULL")
                    ))
                })?;
            CheckableItem::Media {
                title: required_text(row, "title", &isbn)?,
                author: row.get::<_, Option<String>>("author")?.unwrap_or_default(),
                media_type,
            }
        }
        CheckableType::ScienceKit => CheckableItem::ScienceKit {
            name: required_text(row, "name", &isbn)?,
        },
        CheckableType::Ticket => CheckableItem::Ticket {
            name: required_text(row, "name", &isbn)?,
        },
    };

    let checkable = Checkable { isbn, item };
    checkable.validate()?;
    Ok(checkable)
}

fn required_text(row: &Row<'_>, column: &str, isbn: &str) -> RepoResult<String> {
    row.get::<_, Option<String>>(column)?
        .ok_or_else(|| RepoError::InvalidData(format!("missing {column} for checkable `{isbn}`")))
}

fn checkable_type_to_db(kind: CheckableType) -> &'static str {
    match kind {
        CheckableType::Media => "media",
        CheckableType::ScienceKit => "science_kit",
        CheckableType::Ticket => "ticket",
    }
}

fn parse_checkable_type(value: &str) -> Option<CheckableType> {
    match value {
        "media" => Some(CheckableType::Media),
        "science_kit" => Some(CheckableType::ScienceKit),
        "ticket" => Some(CheckableType::Ticket),
        _ => None,
    }
}

fn media_type_to_db(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Book => "book",
        MediaType::Music => "music",
        MediaType::Video => "video",
    }
}

fn parse_media_type(value: &str) -> Option<MediaType> {
    match value {
        "book" => Some(MediaType::Book),
        "music" => Some(MediaType::Music),
        "video" => Some(MediaType::Video),
        _ => None,
    }
}
