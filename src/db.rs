//! Database schema initialization.

use rusqlite::Connection;

use crate::{Error, category::create_category_table, entry::create_entry_table};

/// Create the application's tables if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    create_category_table(connection)?;
    create_entry_table(connection)?;

    Ok(())
}
