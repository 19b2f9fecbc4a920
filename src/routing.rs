//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_new_category_page,
    },
    endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, edit_entry_endpoint, get_edit_entry_page,
        get_entries_page, get_new_entry_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::{generate_report_endpoint, get_reports_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_entries_page))
        .route(endpoints::NEW_ENTRY_VIEW, get(get_new_entry_page))
        .route(endpoints::EDIT_ENTRY_VIEW, get(get_edit_entry_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::POST_ENTRY, post(create_entry_endpoint))
        .route(endpoints::PUT_ENTRY, put(edit_entry_endpoint))
        .route(endpoints::DELETE_ENTRY, delete(delete_entry_endpoint))
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::GENERATE_REPORT, post(generate_report_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
