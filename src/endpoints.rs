//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/entries/{entry_id}', use [format_endpoint].

/// The root route, which renders the entry list as the default view.
pub const ROOT: &str = "/";
/// The page for creating a new entry.
pub const NEW_ENTRY_VIEW: &str = "/entries/new";
/// The page for editing an existing entry.
pub const EDIT_ENTRY_VIEW: &str = "/entries/{entry_id}/edit";
/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page for generating monthly reports.
pub const REPORTS_VIEW: &str = "/reports";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an entry.
pub const POST_ENTRY: &str = "/api/entries";
/// The route to update an entry.
pub const PUT_ENTRY: &str = "/api/entries/{entry_id}";
/// The route to delete an entry.
pub const DELETE_ENTRY: &str = "/api/entries/{entry_id}";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to generate the monthly report partial.
pub const GENERATE_REPORT: &str = "/api/reports";

/// Replace the brace-delimited parameter in `endpoint_path` with `id`.
///
/// For example, '/entries/{entry_id}' becomes '/entries/42'. Assumes the
/// path is ASCII and holds at most one parameter. Paths without a parameter
/// are returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests exist so we know the routes parse as URIs without panicking.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::NEW_ENTRY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_ENTRY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_CATEGORY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::REPORTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::POST_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::PUT_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::DELETE_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::POST_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::DELETE_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::GENERATE_REPORT);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
