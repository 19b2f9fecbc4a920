//! Entries listing page, served at the application root.

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
    category::get_all_categories,
    entry::core::{Entry, EntryType, get_all_entries},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the entries listing page.
#[derive(Debug, Clone)]
pub struct EntriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EntriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// An entry with its category name and edit URL for template rendering.
#[derive(Debug, Clone)]
struct EntryRow {
    pub entry: Entry,
    pub category_name: String,
    pub edit_url: String,
}

/// Render the entries listing page.
pub async fn get_entries_page(State(state): State<EntriesPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entries = get_all_entries(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve entries: {error}"))?;

    let category_names = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?
        .into_iter()
        .map(|category| (category.id, category.name.to_string()))
        .collect::<HashMap<_, _>>();

    let rows = entries
        .into_iter()
        .map(|entry| EntryRow {
            edit_url: endpoints::format_endpoint(endpoints::EDIT_ENTRY_VIEW, entry.id),
            category_name: category_names
                .get(&entry.category_id)
                .cloned()
                .unwrap_or_default(),
            entry,
        })
        .collect::<Vec<_>>();

    Ok(entries_view(&rows).into_response())
}

fn entries_view(rows: &[EntryRow]) -> Markup {
    let new_entry_route = endpoints::NEW_ENTRY_VIEW;
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let table_row = |row: &EntryRow| {
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_ENTRY, row.entry.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'?",
            row.entry.description
        );
        let amount_style = match row.entry.entry_type {
            EntryType::Revenue => "text-green-600 dark:text-green-400 tabular-nums",
            EntryType::Expense => "text-red-600 dark:text-red-400 tabular-nums",
        };

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (row.entry.date)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (row.entry.description)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        (row.category_name)
                    }
                }

                td class={(TABLE_CELL_STYLE) " " (amount_style)}
                {
                    @if matches!(row.entry.entry_type, EntryType::Expense) {
                        "-"
                    }
                    (row.entry.amount)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(row.edit_url) class=(LINK_STYLE)
                        {
                            "Edit"
                        }

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
                    h1 class="text-xl font-bold" { "Entries" }

                    a href=(new_entry_route) class=(LINK_STYLE)
                    {
                        "New Entry"
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
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
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No entries recorded yet. "
                                        a href=(new_entry_route) class=(LINK_STYLE)
                                        {
                                            "Record your first entry"
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

    base("Entries", &[], &content)
}
