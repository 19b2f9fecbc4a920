//! Caixa is a web app for tracking personal revenue and expenses.
//!
//! Users record entries against categories and generate monthly reports
//! with aggregate totals and a revenue-by-category chart. This library
//! provides an HTTP server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod currency;
mod db;
mod endpoints;
mod entry;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod report;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
mod validation;

pub use app_state::AppState;
pub use currency::Money;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use validation::{ValidationError, resolve_message};

use crate::{
    alert::Alert,
    category::CategoryId,
    internal_server_error::{InternalServerErrorPage, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that signals the server to shut down gracefully once either
/// the ctrl+c or terminate signal arrives.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("could not install ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("could not install terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate",
    };

    tracing::debug!("Received {signal_name} signal, shutting down.");
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The category ID used to create an entry did not match a valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// A category with the same name already exists.
    #[error("a category with this name already exists")]
    DuplicateCategoryName,

    /// The category is still referenced by one or more entries.
    ///
    /// Entries must be moved to another category or deleted before the
    /// category can be removed.
    #[error("the category is still used by {0} entries")]
    CategoryInUse(usize),

    /// A string could not be parsed as a currency amount.
    #[error("\"{0}\" is not a valid currency amount")]
    InvalidAmount(String),

    /// A date in the future was used to create an entry.
    ///
    /// Entries record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete an entry that does not exist
    #[error("tried to delete an entry that is not in the database")]
    DeleteMissingEntry,

    /// Tried to update an entry that does not exist
    #[error("tried to update an entry that is not in the database")]
    UpdateMissingEntry,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidCategory(None)
            }
            // Code 2067 occurs when a UNIQUE constraint failed. The only
            // unique column besides the row ids is the category name.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 2067 =>
            {
                Error::DuplicateCategoryName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPage {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                })
            }
            Error::DatabaseLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::FutureDate(date) => Alert::error(
                "Invalid entry date",
                &format!("{date} is a date in the future, which is not allowed."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::InvalidCategory(category_id) => Alert::error(
                "Invalid category ID",
                &format!("Could not find a category with the ID {category_id:?}"),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::DuplicateCategoryName => Alert::error(
                "Could not create category",
                "A category with this name already exists.",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::CategoryInUse(entry_count) => Alert::error(
                "Could not delete category",
                &format!(
                    "The category is still used by {entry_count} entries. \
                    Move those entries to another category first."
                ),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::InvalidAmount(amount) => Alert::error(
                "Invalid amount",
                &format!("\"{amount}\" is not a valid currency amount."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::UpdateMissingEntry => {
                Alert::error("Could not update entry", "The entry could not be found.")
                    .into_response(StatusCode::NOT_FOUND)
            }
            Error::DeleteMissingEntry => Alert::error(
                "Could not delete entry",
                "The entry could not be found. \
                Try refreshing the page to see if the entry has already been deleted.",
            )
            .into_response(StatusCode::NOT_FOUND),
            Error::DeleteMissingCategory => Alert::error(
                "Could not delete category",
                "The category could not be found. \
                Try refreshing the page to see if the category has already been deleted.",
            )
            .into_response(StatusCode::NOT_FOUND),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
