//! Defines the route handler for the page for creating a new entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    category::{Category, get_all_categories},
    entry::{
        core::EntryType,
        form::{EntryFormAction, EntryFormDefaults, EntryFormErrors, entry_form},
    },
    html::{FORM_CONTAINER_STYLE, base, currency_input_styles},
    navigation::NavBar,
    timezone::local_date_today,
};

/// The state needed for the new entry page.
#[derive(Debug, Clone)]
pub struct CreateEntryPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
    /// The database connection for accessing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for creating an entry.
pub async fn get_new_entry_page(
    State(state): State<CreateEntryPageState>,
) -> Result<Response, Error> {
    let available_categories = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_categories(&connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve categories for new entry page: {error}")
        })?
    };

    let max_date = local_date_today(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    Ok(new_entry_view(max_date, &available_categories).into_response())
}

fn new_entry_view(max_date: Date, available_categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_ENTRY_VIEW).into_html();
    let defaults = EntryFormDefaults {
        entry_type: EntryType::Expense,
        description: None,
        amount: None,
        category_id: None,
        date: max_date,
        max_date,
    };
    let form = entry_form(
        EntryFormAction::Create,
        &defaults,
        &EntryFormErrors::default(),
        available_categories,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("New Entry", &[currency_input_styles()], &content)
}
