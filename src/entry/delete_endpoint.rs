//! Defines the endpoint for deleting an entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    entry::core::{EntryId, delete_entry},
};

/// The state needed for deleting an entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteEntryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle entry deletion. Returns a success alert or an error.
pub async fn delete_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(state): State<DeleteEntryEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_entry(entry_id, &connection) {
        Ok(_) => {
            Alert::success("Entry deleted successfully", "").into_response(StatusCode::OK)
        }
        Err(Error::DeleteMissingEntry) => Error::DeleteMissingEntry.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting entry {entry_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_entry_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::{CategoryName, create_category},
        db::initialize,
        entry::core::{EntryBuilder, EntryType, create_entry},
        test_utils::{assert_valid_html, get_header, parse_html_fragment},
    };

    use super::{DeleteEntryEndpointState, delete_entry_endpoint};

    fn get_delete_entry_state() -> DeleteEntryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DeleteEntryEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn delete_entry_endpoint_succeeds() {
        let state = get_delete_entry_state();
        let entry_id = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryName::new_unchecked("Food"), &connection).unwrap();
            create_entry(
                EntryBuilder {
                    description: "groceries".to_string(),
                    amount: "R$40,00".to_string(),
                    entry_type: EntryType::Expense,
                    category_id: category.id,
                    date: date!(2024 - 03 - 10),
                },
                &connection,
            )
            .unwrap()
            .id
        };

        let response = delete_entry_endpoint(Path(entry_id), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_entry_endpoint_with_invalid_id_returns_error_html() {
        let state = get_delete_entry_state();
        let invalid_id = 999999;

        let response = delete_entry_endpoint(Path(invalid_id), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_header(&response, "content-type"),
            "text/html; charset=utf-8"
        );

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(html.html().contains("Could not delete entry"));
    }
}
