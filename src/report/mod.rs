//! Monthly reports.
//!
//! Aggregates the entries for a selected month into expense, revenue and
//! balance totals plus a revenue-by-category bar chart.

mod aggregation;
mod charts;
mod handlers;

pub use aggregation::{ChartSeries, ReportTotals, aggregate};
pub use handlers::{ReportState, generate_report_endpoint, get_reports_page};
