//! Alert partials for displaying success and error messages to users.
//!
//! Alerts render into the `#alert-container` element of the page shell,
//! usually as the target of an htmx `hx-target-error` attribute.

use axum::{http::StatusCode, response::Response};
use maud::{Markup, html};

/// A user-facing alert message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An operation completed successfully.
    Success {
        message: String,
        details: String,
    },
    /// An operation failed.
    Error {
        message: String,
        details: String,
    },
}

impl Alert {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert markup.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 mb-4 rounded-lg bg-green-50 text-green-800 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 rounded-lg bg-red-50 text-red-800 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
        };

        html!(
            div class=(style) role="alert"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        )
    }

    /// Render the alert as an HTTP response with `status_code`.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        use axum::response::IntoResponse;

        (status_code, self.into_html()).into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let markup = Alert::error("Something went wrong", "The details.").into_html();

        let html = Html::parse_fragment(&markup.into_string());
        let alert = html
            .select(&Selector::parse("div[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        let text = alert.text().collect::<String>();

        assert!(text.contains("Something went wrong"));
        assert!(text.contains("The details."));
    }

    #[test]
    fn response_has_status_code() {
        let response =
            Alert::error("nope", "").into_response(StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
