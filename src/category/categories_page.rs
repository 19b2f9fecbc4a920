//! Categories listing page.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    category::{Category, CategoryId, get_all_categories},
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A category with its entry count for template rendering.
#[derive(Debug, Clone)]
struct CategoryRow {
    pub category: Category,
    pub entry_count: u32,
}

/// Render the categories listing page with entry counts.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let entries_per_category = count_entries_per_category(&connection)
        .inspect_err(|error| tracing::error!("Could not count entries per category: {error}"))?;

    let rows = categories
        .into_iter()
        .map(|category| {
            let entry_count = *entries_per_category.get(&category.id).unwrap_or(&0);

            CategoryRow {
                category,
                entry_count,
            }
        })
        .collect::<Vec<_>>();

    Ok(categories_view(&rows).into_response())
}

fn count_entries_per_category(connection: &Connection) -> Result<HashMap<CategoryId, u32>, Error> {
    let result: Result<HashMap<CategoryId, u32>, rusqlite::Error> = connection
        .prepare("SELECT category_id, COUNT(1) FROM entry GROUP BY category_id")?
        .query_map((), |row| {
            let category_id = row.get(0)?;
            let count = row.get(1)?;

            Ok((category_id, count))
        })?
        .collect();

    result.map_err(Error::from)
}

fn categories_view(rows: &[CategoryRow]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |row: &CategoryRow| {
        let delete_url =
            endpoints::format_endpoint(endpoints::DELETE_CATEGORY, row.category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'?",
            row.category.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        (row.category.name)
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (row.entry_count)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    button
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target="closest tr"
                        hx-target-error="#alert-container"
                        hx-swap="delete"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "New Category"
                    }
                }

                section class="dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Name"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Entries"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet. "
                                        a href=(new_category_route) class=(LINK_STYLE)
                                        {
                                            "Create your first category"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}

#[cfg(test)]
mod categories_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::{CategoryName, create_category},
        db::initialize,
        entry::{EntryBuilder, EntryType, create_entry},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{CategoriesPageState, count_entries_per_category, get_categories_page};

    fn get_test_state() -> CategoriesPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CategoriesPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[test]
    fn counts_entries_per_category() {
        let state = get_test_state();
        let connection = state.db_connection.lock().unwrap();
        let salary = create_category(CategoryName::new_unchecked("Salary"), &connection).unwrap();
        let food = create_category(CategoryName::new_unchecked("Food"), &connection).unwrap();
        let want_salary_count = 2;
        let want_food_count = 3;
        for i in 0..want_salary_count {
            create_entry(
                EntryBuilder {
                    description: format!("salary {i}"),
                    amount: "100,00".to_string(),
                    entry_type: EntryType::Revenue,
                    category_id: salary.id,
                    date: date!(2024 - 01 - 15),
                },
                &connection,
            )
            .unwrap();
        }
        for i in 0..want_food_count {
            create_entry(
                EntryBuilder {
                    description: format!("groceries {i}"),
                    amount: "50,00".to_string(),
                    entry_type: EntryType::Expense,
                    category_id: food.id,
                    date: date!(2024 - 01 - 20),
                },
                &connection,
            )
            .unwrap();
        }

        let counts = count_entries_per_category(&connection).unwrap();

        assert_eq!(want_salary_count, counts[&salary.id]);
        assert_eq!(want_food_count, counts[&food.id]);
    }

    #[tokio::test]
    async fn renders_category_names() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_category(CategoryName::new_unchecked("Moradia"), &connection).unwrap();
            create_category(CategoryName::new_unchecked("Lazer"), &connection).unwrap();
        }

        let response = get_categories_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.html();
        assert!(text.contains("Moradia"));
        assert!(text.contains("Lazer"));
    }

    #[tokio::test]
    async fn renders_empty_state() {
        let state = get_test_state();

        let response = get_categories_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(html.html().contains("No categories created yet."));
    }
}
