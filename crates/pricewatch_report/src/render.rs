use prettytable::{row, Table};
use pricewatch_shared_models::format_timestamp;

use crate::format::rounded_amount;
use crate::summary::SummaryReport;

/// HTML body of the summary email.
///
/// Consumers of the report parse this exact layout, so rows, labels,
/// whitespace and number formatting must stay as they are.
pub fn render_html(report: &SummaryReport) -> String {
    let (low, high) = report.variability();

    format!(
        r#"
    <html>
    <body>
        <p>Bitcoin price analysis for the last {minutes} minutes:</p>
        <table border="1" cellpadding="5" cellspacing="0">
            <tr><th>Metric</th><th>Value</th></tr>
            <tr><td>Maximum Price</td><td>{max} USD</td></tr>
            <tr><td>Time of Max Price</td><td>{max_time}</td></tr>
            <tr><td>Minimum Price</td><td>{min} USD</td></tr>
            <tr><td>Time of Min Price</td><td>{min_time}</td></tr>
            <tr><td>Mean Price</td><td>{mean} USD</td></tr>
            <tr><td>Standard Deviation</td><td>{stddev} USD</td></tr>
            <tr><td>Price Variability (Mean ± Std)</td><td>{low} - {high} USD</td></tr>
        </table>
    </body>
    </html>
    "#,
        minutes = report.total_minutes(),
        max = rounded_amount(report.max),
        max_time = format_timestamp(&report.max_time),
        min = rounded_amount(report.min),
        min_time = format_timestamp(&report.min_time),
        mean = rounded_amount(report.mean),
        stddev = rounded_amount(report.stddev),
        low = rounded_amount(low),
        high = rounded_amount(high),
    )
}

/// Console rendition of the same metrics.
pub fn render_table(report: &SummaryReport) -> String {
    let (low, high) = report.variability();

    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Samples", report.count]);
    table.add_row(row!["Window", format!("{} minutes", report.total_minutes())]);
    table.add_row(row!["Maximum Price", format!("{} USD", rounded_amount(report.max))]);
    table.add_row(row!["Time of Max Price", format_timestamp(&report.max_time)]);
    table.add_row(row!["Minimum Price", format!("{} USD", rounded_amount(report.min))]);
    table.add_row(row!["Time of Min Price", format_timestamp(&report.min_time)]);
    table.add_row(row!["Mean Price", format!("{} USD", rounded_amount(report.mean))]);
    table.add_row(row!["Standard Deviation", format!("{} USD", rounded_amount(report.stddev))]);
    table.add_row(row![
        "Price Variability (Mean ± Std)",
        format!("{} - {} USD", rounded_amount(low), rounded_amount(high))
    ]);

    table.to_string()
}
