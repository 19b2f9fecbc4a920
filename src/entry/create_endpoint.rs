//! Defines the endpoint for creating a new entry.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, Money, endpoints,
    category::{CategoryId, get_all_categories},
    entry::{
        core::{EntryBuilder, EntryType, create_entry},
        form::{
            EntryFormAction, EntryFormDefaults, EntryFormErrors, entry_form, validate_amount,
            validate_description,
        },
    },
    timezone::local_date_today,
};

/// The state needed to create an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating or updating an entry.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    /// Text detailing the entry.
    pub description: String,
    /// The amount of money as typed into the form.
    pub amount: String,
    /// Whether the entry is revenue or an expense.
    pub entry_type: EntryType,
    /// The ID of the category the entry belongs to.
    pub category_id: CategoryId,
    /// The date when the money moved.
    pub date: Date,
}

/// A route handler for creating a new entry, redirects to the entries view on success.
///
/// When a field fails validation the form is re-rendered with the message
/// below the offending input.
pub async fn create_entry_endpoint(
    State(state): State<CreateEntryState>,
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
            EntryFormAction::Create,
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
        tracing::error!("Tried to create an entry with a future date");

        return Error::FutureDate(form.date).into_alert_response();
    }

    let builder = EntryBuilder {
        description: form.description.trim().to_owned(),
        // Store the canonical rendering so every page shows the same string.
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

    if let Err(error) = create_entry(builder, &connection) {
        tracing::error!("could not create entry: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
