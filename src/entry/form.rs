//! The shared form fields for creating and editing entries.

use maud::{Markup, html};
use time::Date;

use crate::{
    ValidationError, endpoints,
    category::{Category, CategoryId},
    entry::core::{EntryId, EntryType},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    validation::field_error,
};

/// The longest description the entry form accepts.
pub const DESCRIPTION_MAX_LENGTH: usize = 80;

/// The shortest description the entry form accepts.
pub const DESCRIPTION_MIN_LENGTH: usize = 2;

/// The values the form fields are rendered with.
pub struct EntryFormDefaults<'a> {
    pub entry_type: EntryType,
    pub description: Option<&'a str>,
    pub amount: Option<&'a str>,
    pub category_id: Option<CategoryId>,
    pub date: Date,
    pub max_date: Date,
}

/// Per-field validation failures collected by the form handlers.
///
/// After a failed submit every field counts as touched, so a non-empty
/// error list renders its message directly below the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryFormErrors {
    pub description: Vec<ValidationError>,
    pub amount: Vec<ValidationError>,
}

impl EntryFormErrors {
    /// Whether any field has a validation failure.
    pub fn any(&self) -> bool {
        !self.description.is_empty() || !self.amount.is_empty()
    }
}

/// Check the entry description against the form's length rules.
pub fn validate_description(description: &str) -> Vec<ValidationError> {
    let description = description.trim();

    if description.is_empty() {
        return vec![ValidationError::Required];
    }

    let length = description.chars().count();
    let mut errors = Vec::new();

    if length < DESCRIPTION_MIN_LENGTH {
        errors.push(ValidationError::MinLength {
            required_length: DESCRIPTION_MIN_LENGTH,
        });
    }

    if length > DESCRIPTION_MAX_LENGTH {
        errors.push(ValidationError::MaxLength {
            required_length: DESCRIPTION_MAX_LENGTH,
        });
    }

    errors
}

/// Check that an amount was submitted at all.
///
/// Whether the string parses as currency is checked separately with
/// [crate::Money::parse].
pub fn validate_amount(amount: &str) -> Vec<ValidationError> {
    if amount.trim().is_empty() {
        vec![ValidationError::Required]
    } else {
        Vec::new()
    }
}

/// Whether the form creates a new entry or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormAction {
    Create,
    Update(EntryId),
}

/// Render the complete entry form.
///
/// The same form serves both the create and the edit page; the action
/// decides the heading, the submit label and which endpoint the form
/// targets.
pub fn entry_form(
    action: EntryFormAction,
    defaults: &EntryFormDefaults<'_>,
    errors: &EntryFormErrors,
    available_categories: &[Category],
) -> Markup {
    let (heading, submit_label) = match action {
        EntryFormAction::Create => ("New Entry", "Create Entry"),
        EntryFormAction::Update(_) => ("Edit Entry", "Save Changes"),
    };
    let post_url = matches!(action, EntryFormAction::Create).then_some(endpoints::POST_ENTRY);
    let put_url = match action {
        EntryFormAction::Create => None,
        EntryFormAction::Update(entry_id) => {
            Some(endpoints::format_endpoint(endpoints::PUT_ENTRY, entry_id))
        }
    };

    html! {
        form
            hx-post=[post_url]
            hx-put=[put_url.as_deref()]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { (heading) }

            (entry_form_fields(defaults, errors, available_categories))

            button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                (submit_label)
            }
        }
    }
}

/// Render the entry form fields with defaults and inline error messages.
pub fn entry_form_fields(
    defaults: &EntryFormDefaults<'_>,
    errors: &EntryFormErrors,
    available_categories: &[Category],
) -> Markup {
    let is_expense = matches!(defaults.entry_type, EntryType::Expense);

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="entry_type"
                        id="entry-type-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="entry-type-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="entry_type"
                        id="entry-type-revenue"
                        type="radio"
                        value="revenue"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="entry-type-revenue"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Revenue"
                    }
                }
            }
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(&errors.description, !errors.description.is_empty(), true))
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="0,00"
                    required
                    value=[defaults.amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (field_error(&errors.amount, !errors.amount.is_empty(), true))
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category_id"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category_id"
                id="category_id"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected[defaults.category_id.is_none()]
                {
                    "Select a category"
                }

                @for category in available_categories {
                    @if Some(category.id) == defaults.category_id {
                        option value=(category.id) selected { (category.name) }
                    } @else {
                        option value=(category.id) { (category.name) }
                    }
                }
            }
        }
    }
}


#[cfg(test)]
mod validation_tests {
    use crate::ValidationError;

    use super::{validate_amount, validate_description};

    #[test]
    fn empty_description_is_required() {
        assert_eq!(validate_description("  "), vec![ValidationError::Required]);
    }

    #[test]
    fn short_description_fails_min_length() {
        assert_eq!(
            validate_description("a"),
            vec![ValidationError::MinLength { required_length: 2 }]
        );
    }

    #[test]
    fn long_description_fails_max_length() {
        let description = "x".repeat(81);

        assert_eq!(
            validate_description(&description),
            vec![ValidationError::MaxLength {
                required_length: 80
            }]
        );
    }

    #[test]
    fn reasonable_description_passes() {
        assert!(validate_description("Supermercado").is_empty());
    }

    #[test]
    fn empty_amount_is_required() {
        assert_eq!(validate_amount(""), vec![ValidationError::Required]);
    }

    #[test]
    fn non_empty_amount_passes() {
        assert!(validate_amount("R$40,00").is_empty());
    }
}
