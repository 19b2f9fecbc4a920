//! Data aggregation for the monthly report.

use crate::{
    Money,
    category::Category,
    entry::{Entry, EntryType},
};

/// The monthly totals shown at the top of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTotals {
    /// The sum of all expense entries in the period.
    pub expense_total: Money,
    /// The sum of all revenue entries in the period.
    pub revenue_total: Money,
    /// Revenue minus expenses.
    pub balance: Money,
}

/// The labels and values for the revenue-by-category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// One label per category with at least one revenue entry, in category order.
    pub labels: Vec<String>,
    /// The revenue per category in reais, parallel to `labels`.
    pub data: Vec<f64>,
}

/// Compute the report totals and the revenue-by-category series.
///
/// Totals accumulate in whole centavos so repeated runs over the same
/// entries always produce the same result. An entry whose amount string
/// does not parse is logged and counted as zero rather than failing the
/// whole report. Categories without any revenue entries are left out of
/// the chart series; a category whose revenue entries sum to zero still
/// charts as a zero-height bar.
pub fn aggregate(entries: &[Entry], categories: &[Category]) -> (ReportTotals, ChartSeries) {
    let mut expense_total = Money::ZERO;
    let mut revenue_total = Money::ZERO;
    let mut revenue_per_category: Vec<Option<Money>> = vec![None; categories.len()];

    for entry in entries {
        let amount = match Money::parse(&entry.amount) {
            Ok(amount) => amount,
            Err(error) => {
                tracing::warn!(
                    "Skipping unparseable amount on entry {}: {error}",
                    entry.id
                );
                continue;
            }
        };

        match entry.entry_type {
            EntryType::Expense => expense_total += amount,
            EntryType::Revenue => {
                revenue_total += amount;

                if let Some(position) = categories
                    .iter()
                    .position(|category| category.id == entry.category_id)
                {
                    let revenue = revenue_per_category[position].get_or_insert(Money::ZERO);
                    *revenue += amount;
                }
            }
        }
    }

    let totals = ReportTotals {
        expense_total,
        revenue_total,
        balance: revenue_total - expense_total,
    };

    let (labels, data) = categories
        .iter()
        .zip(revenue_per_category)
        .filter_map(|(category, revenue)| {
            revenue.map(|revenue| (category.name.to_string(), revenue.as_reais()))
        })
        .unzip();

    (totals, ChartSeries { labels, data })
}

#[cfg(test)]
mod aggregate_tests {
    use time::macros::date;

    use crate::{
        Money,
        category::{Category, CategoryName},
        entry::{Entry, EntryType},
    };

    use super::aggregate;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: CategoryName::new_unchecked(name),
        }
    }

    fn entry(id: i64, amount: &str, entry_type: EntryType, category_id: i64) -> Entry {
        Entry {
            id,
            description: format!("entry {id}"),
            amount: amount.to_string(),
            entry_type,
            category_id,
            date: date!(2024 - 03 - 10),
        }
    }

    #[test]
    fn computes_totals_and_revenue_series() {
        let categories = [category(1, "Salary"), category(2, "Food")];
        let entries = [
            entry(1, "100,00", EntryType::Revenue, 1),
            entry(2, "40,00", EntryType::Expense, 2),
        ];

        let (totals, series) = aggregate(&entries, &categories);

        assert_eq!(totals.expense_total.to_string(), "R$40,00");
        assert_eq!(totals.revenue_total.to_string(), "R$100,00");
        assert_eq!(totals.balance.to_string(), "R$60,00");
        assert_eq!(series.labels, vec!["Salary".to_owned()]);
        assert_eq!(series.data, vec![100.0]);
    }

    #[test]
    fn balance_is_revenue_minus_expenses() {
        let categories = [category(1, "Salary"), category(2, "Food")];
        let entries = [
            entry(1, "1.234,56", EntryType::Revenue, 1),
            entry(2, "234,56", EntryType::Expense, 2),
            entry(3, "1.000,00", EntryType::Expense, 2),
        ];

        let (totals, _) = aggregate(&entries, &categories);

        assert_eq!(
            totals.balance,
            totals.revenue_total - totals.expense_total
        );
        assert_eq!(totals.balance, Money::ZERO);
    }

    #[test]
    fn empty_input_yields_zero_totals_and_empty_series() {
        let (totals, series) = aggregate(&[], &[category(1, "Salary")]);

        assert_eq!(totals.expense_total, Money::ZERO);
        assert_eq!(totals.revenue_total, Money::ZERO);
        assert_eq!(totals.balance, Money::ZERO);
        assert!(series.labels.is_empty());
        assert!(series.data.is_empty());
    }

    #[test]
    fn series_preserves_category_order_and_omits_unmatched_categories() {
        let categories = [
            category(1, "Freelance"),
            category(2, "Food"),
            category(3, "Salary"),
        ];
        let entries = [
            entry(1, "3.000,00", EntryType::Revenue, 3),
            entry(2, "500,00", EntryType::Revenue, 1),
            entry(3, "40,00", EntryType::Expense, 2),
        ];

        let (_, series) = aggregate(&entries, &categories);

        assert_eq!(
            series.labels,
            vec!["Freelance".to_owned(), "Salary".to_owned()]
        );
        assert_eq!(series.data, vec![500.0, 3_000.0]);
    }

    #[test]
    fn zero_revenue_entry_still_charts_its_category() {
        let categories = [category(1, "Salary"), category(2, "Food")];
        let entries = [
            entry(1, "0,00", EntryType::Revenue, 1),
            entry(2, "40,00", EntryType::Expense, 2),
        ];

        let (_, series) = aggregate(&entries, &categories);

        assert_eq!(series.labels, vec!["Salary".to_owned()]);
        assert_eq!(series.data, vec![0.0]);
    }

    #[test]
    fn entries_canceling_to_zero_still_chart_their_category() {
        let categories = [category(1, "Refunds")];
        let entries = [
            entry(1, "50,00", EntryType::Revenue, 1),
            entry(2, "-50,00", EntryType::Revenue, 1),
        ];

        let (_, series) = aggregate(&entries, &categories);

        assert_eq!(series.labels, vec!["Refunds".to_owned()]);
        assert_eq!(series.data, vec![0.0]);
    }

    #[test]
    fn unparseable_amounts_count_as_zero() {
        let categories = [category(1, "Salary")];
        let entries = [
            entry(1, "100,00", EntryType::Revenue, 1),
            entry(2, "not money", EntryType::Revenue, 1),
        ];

        let (totals, series) = aggregate(&entries, &categories);

        assert_eq!(totals.revenue_total.to_string(), "R$100,00");
        assert_eq!(series.data, vec![100.0]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let categories = [category(1, "Salary"), category(2, "Food")];
        let entries = [
            entry(1, "0,10", EntryType::Revenue, 1),
            entry(2, "0,20", EntryType::Revenue, 1),
            entry(3, "0,15", EntryType::Expense, 2),
        ];

        let first = aggregate(&entries, &categories);
        let second = aggregate(&entries, &categories);

        assert_eq!(first, second);
        assert_eq!(first.0.revenue_total, Money::from_centavos(30));
    }
}
