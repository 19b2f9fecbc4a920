//! Report HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    alert::Alert,
    category::get_all_categories,
    endpoints,
    entry::get_entries_by_month_and_year,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    report::{
        aggregation::{ReportTotals, aggregate},
        charts::revenue_chart_view,
    },
    timezone::local_date_today,
};

/// How many years back the year selector reaches.
const YEAR_OPTIONS: i32 = 10;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The alert shown when the report is requested without a period.
const MISSING_PERIOD_MESSAGE: &str =
    "Você precisa selecionar o Mês e o Ano para gerar os relatórios";

/// The state needed for the reports page and the report endpoint.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading entries and categories.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for generating a report.
///
/// Both fields default to the empty string so that a submit without a
/// selection still deserializes and can be answered with an alert.
#[derive(Debug, Deserialize)]
pub struct ReportForm {
    /// The selected month as a number from 1 to 12, or empty.
    #[serde(default)]
    pub month: String,
    /// The selected year, or empty.
    #[serde(default)]
    pub year: String,
}

/// Render the reports page with the month and year selectors.
pub async fn get_reports_page(State(state): State<ReportState>) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let current_year = today.year();

    Ok(reports_view(current_year).into_response())
}

/// Generate the report partial for the selected month and year.
///
/// Responds with an alert when either selector was left empty.
pub async fn generate_report_endpoint(
    State(state): State<ReportState>,
    Form(form): Form<ReportForm>,
) -> Response {
    let Some((year, month)) = parse_period(&form) else {
        return Alert::error(MISSING_PERIOD_MESSAGE, "")
            .into_response(StatusCode::BAD_REQUEST);
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let entries = match get_entries_by_month_and_year(year, month, &connection) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::error!("Failed to retrieve entries for {month:?} {year}: {error}");
            return error.into_alert_response();
        }
    };

    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories: {error}");
            return error.into_alert_response();
        }
    };

    let (totals, series) = aggregate(&entries, &categories);

    report_partial(&totals, revenue_chart_view(&series)).into_response()
}

fn parse_period(form: &ReportForm) -> Option<(i32, Month)> {
    let month: u8 = form.month.trim().parse().ok()?;
    let year: i32 = form.year.trim().parse().ok()?;
    let month = Month::try_from(month).ok()?;

    Some((year, month))
}

fn reports_view(current_year: i32) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let generate_report_route = endpoints::GENERATE_REPORT;

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                h1 class="text-xl font-bold" { "Reports" }

                form
                    hx-post=(generate_report_route)
                    hx-target="#report-content"
                    hx-target-error="#alert-container"
                    class="flex flex-wrap items-end gap-4"
                {
                    div
                    {
                        label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                        select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" selected { "Select a month" }

                            @for (index, name) in MONTH_NAMES.iter().enumerate() {
                                option value=((index + 1)) { (name) }
                            }
                        }
                    }

                    div
                    {
                        label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                        select name="year" id="year" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" selected { "Select a year" }

                            @for year in (current_year - YEAR_OPTIONS + 1..=current_year).rev() {
                                option value=(year) { (year) }
                            }
                        }
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Generate" }
                }

                div id="report-content" {}
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Reports", &scripts, &content)
}

fn report_partial(totals: &ReportTotals, chart: Markup) -> Markup {
    let card = |label: &str, value: String, value_style: &str| {
        html!(
            div class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm
                dark:border-gray-700 dark:bg-gray-800"
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                p class={"text-lg font-bold tabular-nums " (value_style)}
                {
                    (value)
                }
            }
        )
    };

    html!(
        div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-4"
        {
            (card(
                "Expenses",
                totals.expense_total.to_string(),
                "text-red-600 dark:text-red-400",
            ))
            (card(
                "Revenue",
                totals.revenue_total.to_string(),
                "text-green-600 dark:text-green-400",
            ))
            (card(
                "Balance",
                totals.balance.to_string(),
                "text-gray-900 dark:text-white",
            ))
        }

        (chart)
    )
}

#[cfg(test)]
mod reports_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        db::initialize,
        endpoints,
        test_utils::{assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document},
    };

    use super::{ReportState, get_reports_page};

    fn get_test_state() -> ReportState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        ReportState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn renders_month_and_year_selectors() {
        let state = get_test_state();

        let response = get_reports_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::GENERATE_REPORT, "hx-post");

        let month_options = Selector::parse("select[name=month] option").unwrap();
        // 12 months plus the placeholder.
        assert_eq!(form.select(&month_options).count(), 13);

        let year_select = Selector::parse("select[name=year]").unwrap();
        assert!(form.select(&year_select).next().is_some());
    }
}
