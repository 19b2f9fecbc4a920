//! Form field validation errors and their user-facing messages.
//!
//! Server-side form handlers collect [ValidationError]s per field and the
//! views render them through [field_error]. Message resolution checks the
//! error kinds in a fixed priority order so a field with several problems
//! shows the most fundamental one first.

use maud::{Markup, html};

/// A single validation failure on a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field is required but empty.
    Required,
    /// The value is not a valid email address.
    Email,
    /// The value is shorter than the minimum length.
    MinLength {
        /// The minimum number of characters the field accepts.
        required_length: usize,
    },
    /// The value is longer than the maximum length.
    MaxLength {
        /// The maximum number of characters the field accepts.
        required_length: usize,
    },
    /// A validator kind this resolver does not recognize.
    ///
    /// Carried so that unknown kinds pass through silently instead of
    /// producing a message or an error.
    Other(String),
}

/// Derive the message to show for a field, if any.
///
/// Returns `None` unless the field is both invalid and has been touched:
/// a control the user has not interacted with never shows an error.
/// When a message is due, error kinds are checked in priority order
/// (required, then email, then the length bounds) and the first match
/// wins. [ValidationError::Other] kinds never produce a message.
pub fn resolve_message(
    errors: &[ValidationError],
    is_invalid: bool,
    is_touched: bool,
) -> Option<String> {
    if !(is_invalid && is_touched) {
        return None;
    }

    errors
        .iter()
        .find(|error| matches!(error, ValidationError::Required))
        .or_else(|| {
            errors
                .iter()
                .find(|error| matches!(error, ValidationError::Email))
        })
        .or_else(|| {
            errors
                .iter()
                .find(|error| matches!(error, ValidationError::MinLength { .. }))
        })
        .or_else(|| {
            errors
                .iter()
                .find(|error| matches!(error, ValidationError::MaxLength { .. }))
        })
        .and_then(message_for)
}

fn message_for(error: &ValidationError) -> Option<String> {
    match error {
        ValidationError::Required => Some("a value is required".to_owned()),
        ValidationError::Email => Some("value is not a valid email format".to_owned()),
        ValidationError::MinLength { required_length } => Some(format!(
            "must contain at least {required_length} characters"
        )),
        ValidationError::MaxLength { required_length } => {
            Some(format!("must contain at most {required_length} characters"))
        }
        ValidationError::Other(_) => None,
    }
}

/// Render the inline error paragraph for a form field.
///
/// Produces no markup when [resolve_message] yields nothing, so views can
/// emit this unconditionally after each input.
pub fn field_error(errors: &[ValidationError], is_invalid: bool, is_touched: bool) -> Markup {
    match resolve_message(errors, is_invalid, is_touched) {
        Some(message) => html! {
            p class="text-red-600 dark:text-red-400 text-sm" { (message) }
        },
        None => html! {},
    }
}
