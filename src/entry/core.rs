//! Defines the core data models and database queries for entries.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{Error, category::CategoryId};

/// Database identifier for an entry.
pub type EntryId = i64;

/// Whether an entry records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Money earned, e.g. salary, freelance work.
    Revenue,
    /// Money spent, e.g. rent, groceries.
    Expense,
}

impl EntryType {
    /// The database representation of the entry type.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Revenue => "revenue",
            EntryType::Expense => "expense",
        }
    }

    fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "revenue" => Some(EntryType::Revenue),
            "expense" => Some(EntryType::Expense),
            _ => None,
        }
    }
}

/// A single revenue or expense record.
///
/// The amount is kept as a formatted BRL currency string, matching what the
/// entry form submits and what the pages display. Use [crate::Money::parse]
/// to get a numeric value out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The ID of the entry.
    pub id: EntryId,
    /// A text description of what the entry was for.
    pub description: String,
    /// The amount of money earned or spent, as a BRL currency string.
    pub amount: String,
    /// Whether the entry is revenue or an expense.
    pub entry_type: EntryType,
    /// The ID of the category the entry belongs to.
    pub category_id: CategoryId,
    /// When the money moved.
    pub date: Date,
}

/// The fields needed to create or update an [Entry].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBuilder {
    /// A text description of what the entry was for.
    pub description: String,
    /// The amount of money earned or spent, as a BRL currency string.
    pub amount: String,
    /// Whether the entry is revenue or an expense.
    pub entry_type: EntryType,
    /// The ID of the category the entry belongs to.
    pub category_id: CategoryId,
    /// When the money moved.
    pub date: Date,
}

/// Create the entry table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_entry_table(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS entry (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                entry_type TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id)
                )",
        (),
    )?;

    // Index used by the monthly report query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_entry_date ON entry(date);",
        (),
    )?;

    Ok(())
}

/// Create a new entry in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_entry(builder: EntryBuilder, connection: &Connection) -> Result<Entry, Error> {
    connection
        .prepare(
            "INSERT INTO entry (description, amount, entry_type, category_id, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, description, amount, entry_type, category_id, date",
        )?
        .query_row(
            params![
                builder.description,
                builder.amount,
                builder.entry_type.as_str(),
                builder.category_id,
                builder.date,
            ],
            map_entry_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(Some(builder.category_id)),
            error => error.into(),
        })
}

/// Retrieve an entry from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid entry,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_entry(id: EntryId, connection: &Connection) -> Result<Entry, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, entry_type, category_id, date
             FROM entry WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_entry_row)
        .map_err(|error| error.into())
}

/// Retrieve all entries in the database, most recent first.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_entries(connection: &Connection) -> Result<Vec<Entry>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, entry_type, category_id, date
             FROM entry ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the entries dated within the given month, oldest first.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_entries_by_month_and_year(
    year: i32,
    month: Month,
    connection: &Connection,
) -> Result<Vec<Entry>, Error> {
    let period_start = Date::from_calendar_date(year, month, 1)
        .map_err(|_| Error::NotFound)?;
    let period_end = match month {
        Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
        month => Date::from_calendar_date(year, month.next(), 1),
    }
    .map_err(|_| Error::NotFound)?;

    connection
        .prepare(
            "SELECT id, description, amount, entry_type, category_id, date
             FROM entry WHERE date >= :start AND date < :end
             ORDER BY date ASC, id ASC",
        )?
        .query_map(
            &[(":start", &period_start), (":end", &period_end)],
            map_entry_row,
        )?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the entry with `id` using the fields in `builder`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingEntry] if `id` does not refer to an entry in the database,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_entry(
    id: EntryId,
    builder: EntryBuilder,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE entry
             SET description = ?1, amount = ?2, entry_type = ?3, category_id = ?4, date = ?5
             WHERE id = ?6",
            params![
                builder.description,
                builder.amount,
                builder.entry_type.as_str(),
                builder.category_id,
                builder.date,
                id,
            ],
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(Some(builder.category_id)),
            error => Error::from(error),
        })?;

    if rows_affected == 0 {
        Err(Error::UpdateMissingEntry)
    } else {
        Ok(())
    }
}

/// Delete the entry with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingEntry] if `id` does not refer to an entry in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_entry(id: EntryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM entry WHERE id = ?1", (id,))?;

    if rows_affected == 0 {
        Err(Error::DeleteMissingEntry)
    } else {
        Ok(())
    }
}

/// Map a database row to an [Entry].
pub fn map_entry_row(row: &Row) -> Result<Entry, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let raw_entry_type: String = row.get(3)?;
    let category_id = row.get(4)?;
    let date = row.get(5)?;

    let entry_type = EntryType::from_db_value(&raw_entry_type).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown entry type {raw_entry_type:?}").into(),
        )
    })?;

    Ok(Entry {
        id,
        description,
        amount,
        entry_type,
        category_id,
        date,
    })
}
