//! Defines the endpoint for updating an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, Money, endpoints,
    category::get_all_categories,
    entry::{
        core::{EntryBuilder, EntryId, update_entry},
        create_endpoint::EntryForm,
        form::{
            EntryFormAction, EntryFormDefaults, EntryFormErrors, entry_form, validate_amount,
            validate_description,
        },
    },
    timezone::local_date_today,
};

/// The state needed to update an entry.
#[derive(Debug, Clone)]
pub struct EditEntryState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for updating an entry, redirects to the entries view on success.
pub async fn edit_entry_endpoint(
    State(state): State<EditEntryState>,
    Path(entry_id): Path<EntryId>,
    Form(form): Form<EntryForm>,
) -> Response {
    let Some(today) = local_date_today(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let errors = EntryFormErrors {
        description: validate_description(&form.description),
        amount: validate_amount(&form.amount),
    };

    if errors.any() {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        let available_categories = match get_all_categories(&connection) {
            Ok(categories) => categories,
            Err(error) => {
                tracing::error!("Failed to retrieve categories: {error}");
                return error.into_alert_response();
            }
        };

        return entry_form(
            EntryFormAction::Update(entry_id),
            &EntryFormDefaults {
                entry_type: form.entry_type,
                description: Some(&form.description),
                amount: Some(&form.amount),
                category_id: Some(form.category_id),
                date: form.date.min(today),
                max_date: today,
            },
            &errors,
            &available_categories,
        )
        .into_response();
    }

    let amount = match Money::parse(&form.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    if form.date > today {
        tracing::error!("Tried to update an entry with a future date");

        return Error::FutureDate(form.date).into_alert_response();
    }

    let builder = EntryBuilder {
        description: form.description.trim().to_owned(),
        amount: amount.to_string(),
        entry_type: form.entry_type,
        category_id: form.category_id,
        date: form.date,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_entry(entry_id, builder, &connection) {
        tracing::error!("could not update entry {entry_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
