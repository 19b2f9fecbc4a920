//! Database queries for categories.

use rusqlite::Connection;

use crate::Error;

use super::domain::{Category, CategoryId, CategoryName};

/// Create the category table in the database.
///
/// # Errors
///
/// Returns an error if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create a category in the database.
///
/// # Errors
///
/// This function will return an error if there is an SQL error.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name) VALUES (?1)",
        (name.as_ref(),),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name })
}

/// Retrieve a category in the database by its `id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid category,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_category(id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories in the database.
///
/// # Errors
///
/// This function will return an error if there is an SQL error.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY id")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete the category with `id` from the database.
///
/// # Errors
///
/// This function will return a:
/// - [Error::CategoryInUse] if one or more entries still reference the category,
/// - [Error::DeleteMissingCategory] if `id` does not refer to a category in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_category(id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let entry_count: u32 = connection
        .prepare("SELECT COUNT(1) FROM entry WHERE category_id = :id")?
        .query_row(&[(":id", &id)], |row| row.get(0))?;

    if entry_count > 0 {
        return Err(Error::CategoryInUse(entry_count as usize));
    }

    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", (id,))?;

    if rows_affected == 0 {
        Err(Error::DeleteMissingCategory)
    } else {
        Ok(())
    }
}

fn map_row(row: &rusqlite::Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{Error, db::initialize};

    use super::{
        super::domain::CategoryName, create_category, delete_category, get_all_categories,
        get_category,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();
        let name = CategoryName::new("Moradia").unwrap();

        let category = create_category(name.clone(), &connection).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_connection();
        let inserted =
            create_category(CategoryName::new("Lazer").unwrap(), &connection).unwrap();

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();
        create_category(CategoryName::new("Lazer").unwrap(), &connection).unwrap();

        let selected = get_category(999, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_connection();
        let category =
            create_category(CategoryName::new("Saúde").unwrap(), &connection).unwrap();

        delete_category(category.id, &connection).unwrap();

        assert_eq!(get_category(category.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_category_with_invalid_id_returns_error() {
        let connection = get_test_connection();

        let result = delete_category(42, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn delete_category_in_use_returns_error() {
        let connection = get_test_connection();
        let category =
            create_category(CategoryName::new("Moradia").unwrap(), &connection).unwrap();
        crate::entry::create_entry(
            crate::entry::EntryBuilder {
                description: "rent".to_string(),
                amount: "1.200,00".to_string(),
                entry_type: crate::entry::EntryType::Expense,
                category_id: category.id,
                date: time::macros::date!(2024 - 02 - 01),
            },
            &connection,
        )
        .unwrap();

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Err(Error::CategoryInUse(1)));
        assert!(get_category(category.id, &connection).is_ok());
    }

    #[test]
    fn delete_category_in_use_reports_how_many_entries_block_it() {
        let connection = get_test_connection();
        let category =
            create_category(CategoryName::new("Transporte").unwrap(), &connection).unwrap();
        for description in ["bus fare", "fuel"] {
            crate::entry::create_entry(
                crate::entry::EntryBuilder {
                    description: description.to_string(),
                    amount: "25,00".to_string(),
                    entry_type: crate::entry::EntryType::Expense,
                    category_id: category.id,
                    date: time::macros::date!(2024 - 02 - 01),
                },
                &connection,
            )
            .unwrap();
        }

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Err(Error::CategoryInUse(2)));
    }

    #[test]
    fn get_all_categories_preserves_insertion_order() {
        let connection = get_test_connection();
        let inserted = ["Salary", "Food", "Leisure"]
            .into_iter()
            .map(|name| {
                create_category(CategoryName::new(name).unwrap(), &connection).unwrap()
            })
            .collect::<Vec<_>>();

        let selected = get_all_categories(&connection).unwrap();

        assert_eq!(inserted, selected);
    }
}
