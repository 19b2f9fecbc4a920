//! Defines the route handler for the page for editing an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    category::{Category, get_all_categories},
    entry::{
        core::{Entry, EntryId, get_entry},
        form::{EntryFormAction, EntryFormDefaults, EntryFormErrors, entry_form},
    },
    html::{FORM_CONTAINER_STYLE, base, currency_input_styles},
    navigation::NavBar,
    timezone::local_date_today,
};

/// The state needed for the edit entry page.
#[derive(Debug, Clone)]
pub struct EditEntryPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
    /// The database connection for accessing entries and categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing the entry with `entry_id`.
pub async fn get_edit_entry_page(
    State(state): State<EditEntryPageState>,
    Path(entry_id): Path<EntryId>,
) -> Result<Response, Error> {
    let (entry, available_categories) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let entry = get_entry(entry_id, &connection).inspect_err(|error| {
            tracing::warn!("Failed to retrieve entry {entry_id}: {error}")
        })?;
        let categories = get_all_categories(&connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve categories for edit entry page: {error}")
        })?;

        (entry, categories)
    };

    let max_date = local_date_today(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    Ok(edit_entry_view(&entry, max_date, &available_categories).into_response())
}

fn edit_entry_view(entry: &Entry, max_date: Date, available_categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let defaults = EntryFormDefaults {
        entry_type: entry.entry_type,
        description: Some(&entry.description),
        amount: Some(&entry.amount),
        category_id: Some(entry.category_id),
        date: entry.date,
        max_date,
    };
    let form = entry_form(
        EntryFormAction::Update(entry.id),
        &defaults,
        &EntryFormErrors::default(),
        available_categories,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Entry", &[currency_input_styles()], &content)
}
