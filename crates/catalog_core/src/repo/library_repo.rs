//! Library store contract and SQLite implementation.
//!
//! # Responsibility
//! - Load full library aggregates (inventory, cards, patrons, checkouts).
//! - Persist a new library aggregate atomically.
//!
//! # Invariants
//! - `find_all` returns libraries in insertion order.
//! - Inventory rows, cards and per-card checkouts keep their insertion order.
//! - `save` is all-or-nothing; a failed write leaves no partial aggregate.
//! - Timestamps are stored as UTC epoch nanoseconds and read back unchanged.
//! - A stored patron keeps one name; saving the same id with another name fails.

use crate::model::library::{CheckableAmount, Checkout, Library, LibraryCard, Patron};
use crate::repo::checkable_repo::{parse_checkable_row, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

const INVENTORY_SQL: &str = "SELECT
    c.isbn AS isbn, c.kind AS kind, c.title AS title,
    c.author AS author, c.media_type AS media_type, c.name AS name,
    lc.amount AS amount
FROM library_checkables lc
JOIN checkables c ON c.isbn = lc.isbn
WHERE lc.library_name = ?1
ORDER BY lc.rowid ASC;";

const CARDS_SQL: &str = "SELECT
    card.uuid AS card_uuid,
    p.uuid AS patron_uuid,
    p.name AS patron_name
FROM library_cards card
JOIN patrons p ON p.uuid = card.patron_uuid
WHERE card.library_name = ?1
ORDER BY card.rowid ASC;";

const CHECKOUTS_SQL: &str = "SELECT
    c.isbn AS isbn, c.kind AS kind, c.title AS title,
    c.author AS author, c.media_type AS media_type, c.name AS name,
    co.checkout_date AS checkout_date, co.due_date AS due_date
FROM checkouts co
JOIN checkables c ON c.isbn = co.isbn
WHERE co.card_uuid = ?1
ORDER BY co.seq ASC;";

/// Persistence contract for libraries.
pub trait LibraryRepository {
    fn find_all(&self) -> RepoResult<Vec<Library>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Library>>;
    fn save(&self, library: &Library) -> RepoResult<()>;
}

/// SQLite-backed library repository.
pub struct SqliteLibraryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLibraryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_library(&self, name: String) -> RepoResult<Library> {
        let checkables = self.load_inventory(&name)?;
        let library_cards = self.load_cards(&name)?;
        Ok(Library {
            name,
            checkables,
            library_cards,
        })
    }

    fn load_inventory(&self, library_name: &str) -> RepoResult<Vec<CheckableAmount>> {
        let mut stmt = self.conn.prepare(INVENTORY_SQL)?;
        let mut rows = stmt.query([library_name])?;
        let mut inventory = Vec::new();
        while let Some(row) = rows.next()? {
            let checkable = parse_checkable_row(row)?;
            inventory.push(CheckableAmount::new(checkable, row.get("amount")?));
        }
        Ok(inventory)
    }

    fn load_cards(&self, library_name: &str) -> RepoResult<Vec<LibraryCard>> {
        let mut stmt = self.conn.prepare(CARDS_SQL)?;
        let mut rows = stmt.query([library_name])?;
        let mut heads = Vec::new();
        while let Some(row) = rows.next()? {
            let card_id = parse_uuid(row.get("card_uuid")?, "library_cards.uuid")?;
            let patron = Patron {
                id: parse_uuid(row.get("patron_uuid")?, "patrons.uuid")?,
                name: row.get("patron_name")?,
            };
            heads.push((card_id, patron));
        }

        heads
            .into_iter()
            .map(|(id, patron)| -> RepoResult<LibraryCard> {
                Ok(LibraryCard {
                    id,
                    patron,
                    checkouts: self.load_checkouts(id)?,
                })
            })
            .collect()
    }

    fn load_checkouts(&self, card_id: Uuid) -> RepoResult<Vec<Checkout>> {
        let mut stmt = self.conn.prepare(CHECKOUTS_SQL)?;
        let mut rows = stmt.query([card_id.to_string()])?;
        let mut checkouts = Vec::new();
        while let Some(row) = rows.next()? {
            let checkable = parse_checkable_row(row)?;
            checkouts.push(Checkout {
                checkable,
                checkout_date: DateTime::from_timestamp_nanos(row.get("checkout_date")?),
                due_date: DateTime::from_timestamp_nanos(row.get("due_date")?),
            });
        }
        Ok(checkouts)
    }
}

impl LibraryRepository for SqliteLibraryRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Library>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM libraries ORDER BY rowid ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        names
            .into_iter()
            .map(|name| self.load_library(name))
            .collect()
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Library>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM libraries WHERE name = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        stored.map(|name| self.load_library(name)).transpose()
    }

    fn save(&self, library: &Library) -> RepoResult<()> {
        library.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO libraries (name) VALUES (?1);",
            [library.name.as_str()],
        )?;

        for entry in &library.checkables {
            tx.execute(
                "INSERT INTO library_checkables (library_name, isbn, amount)
                 VALUES (?1, ?2, ?3);",
                params![
                    library.name.as_str(),
                    entry.checkable.isbn.as_str(),
                    entry.amount
                ],
            )?;
        }

        for card in &library.library_cards {
            let stored_name: Option<String> = tx
                .query_row(
                    "SELECT name FROM patrons WHERE uuid = ?1;",
                    [card.patron.id.to_string()],
                    |row| row.get(0),
                )
                .optional()?;
            match stored_name {
                Some(name) if name != card.patron.name => {
                    return Err(RepoError::InvalidData(format!(
                        "patron {} is already stored under another name",
                        card.patron.id
                    )));
                }
                Some(_) => {}
                None => {
                    tx.execute(
                        "INSERT INTO patrons (uuid, name) VALUES (?1, ?2);",
                        params![card.patron.id.to_string(), card.patron.name.as_str()],
                    )?;
                }
            }
            tx.execute(
                "INSERT INTO library_cards (uuid, library_name, patron_uuid)
                 VALUES (?1, ?2, ?3);",
                params![
                    card.id.to_string(),
                    library.name.as_str(),
                    card.patron.id.to_string()
                ],
            )?;
            for (seq, checkout) in card.checkouts.iter().enumerate() {
                tx.execute(
                    "INSERT INTO checkouts (card_uuid, seq, isbn, checkout_date, due_date)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        card.id.to_string(),
                        seq as i64,
                        checkout.checkable.isbn.as_str(),
                        epoch_nanos(checkout.checkout_date, "checkout_date")?,
                        epoch_nanos(checkout.due_date, "due_date")?,
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_uuid(value: String, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(&value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Representable between years 1677 and 2262.
fn epoch_nanos(value: DateTime<Utc>, column: &str) -> RepoResult<i64> {
    value.timestamp_nanos_opt().ok_or_else(|| {
        RepoError::InvalidData(format!(
            "timestamp `{}` out of storable range for {column}",
            value.to_rfc3339()
        ))
    })
}
