//! Chart generation for the monthly report.
//!
//! The revenue chart is generated as JSON configuration for the ECharts
//! library and rendered with an HTML container and inline initialization
//! JavaScript, which htmx executes when the report partial is swapped in.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisType, ItemStyle, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::report::aggregation::ChartSeries;

/// The bar color used for revenue, per category.
const REVENUE_BAR_COLOR: &str = "#9ccc65";

/// The HTML element ID of the chart container.
pub(super) const REVENUE_CHART_ID: &str = "revenue-chart";

/// Build the ECharts configuration for the revenue-by-category chart.
pub(super) fn revenue_chart(series: &ChartSeries) -> Chart {
    Chart::new()
        .title(Title::new().text("Revenue by category"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(series.labels.clone()),
        )
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            Bar::new()
                .name("Revenue")
                .item_style(ItemStyle::new().color(REVENUE_BAR_COLOR))
                .data(series.data.clone()),
        )
}

/// Renders the chart container plus the script that initializes it.
pub(super) fn revenue_chart_view(series: &ChartSeries) -> Markup {
    let options = revenue_chart(series).to_string();
    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{REVENUE_CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }})();"#
    );

    html!(
        div
            id=(REVENUE_CHART_ID)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}

        script
        {
            (PreEscaped(script))
        }
    )
}

#[cfg(test)]
mod revenue_chart_tests {
    use crate::report::aggregation::ChartSeries;

    use super::{REVENUE_BAR_COLOR, revenue_chart, revenue_chart_view};

    fn test_series() -> ChartSeries {
        ChartSeries {
            labels: vec!["Salary".to_owned(), "Freelance".to_owned()],
            data: vec![100.0, 250.5],
        }
    }

    #[test]
    fn chart_options_contain_labels_and_color() {
        let options = revenue_chart(&test_series()).to_string();

        assert!(options.contains("Salary"));
        assert!(options.contains("Freelance"));
        assert!(options.contains(REVENUE_BAR_COLOR));
        assert!(options.contains("250.5"));
    }

    #[test]
    fn view_renders_container_and_script() {
        let markup = revenue_chart_view(&test_series()).into_string();

        assert!(markup.contains("id=\"revenue-chart\""));
        assert!(markup.contains("echarts.init"));
    }
}
