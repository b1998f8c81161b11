//! Table and chart datasets built from a year of [`MonthlyResult`]s.
//!
//! The core produces these and the front ends only draw them: the web page
//! turns them into SVG, the CLI into a fixed-width text table.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::{MONTHS, MonthlyResult, SavingsRate, YearlyTotals, yearly_totals};

const SAVINGS_RATE_TITLE: &str = "Monthly Saving Rate (%)";
const CASHFLOW_TITLE: &str = "Income vs Needs vs Wants";
const ALLOCATION_TITLE: &str = "Total Yearly Allocation";

const SLICE_COLORS: [&str; 4] = ["#ff9999", "#66b3ff", "#99ff99", "#ffcc99"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub month: &'static str,
    pub income: f64,
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
    pub invested: f64,
    pub savings_rate: SavingsRate,
    pub savings_rate_label: String,
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub labels: Vec<&'static str>,
    pub values: Vec<SavingsRate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineChart {
    pub title: &'static str,
    pub labels: Vec<&'static str>,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub label: &'static str,
    pub total: f64,
    pub percent: f64,
    pub percent_label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub rows: Vec<TableRow>,
    pub savings_rate_chart: BarChart,
    pub cashflow_chart: LineChart,
    pub allocation_chart: PieChart,
    pub totals: YearlyTotals,
}

pub fn build_report(results: &[MonthlyResult; 12]) -> Report {
    let totals = yearly_totals(results);
    Report {
        rows: results.iter().map(table_row).collect(),
        savings_rate_chart: savings_rate_chart(results),
        cashflow_chart: cashflow_chart(results),
        allocation_chart: allocation_chart(&totals),
        totals,
    }
}

fn table_row(result: &MonthlyResult) -> TableRow {
    TableRow {
        month: result.month,
        income: result.income,
        needs: result.needs,
        wants: result.wants,
        savings: result.savings,
        invested: result.invested,
        savings_rate: result.savings_rate,
        savings_rate_label: result.savings_rate.to_string(),
        category: result.category.label(),
    }
}

fn savings_rate_chart(results: &[MonthlyResult; 12]) -> BarChart {
    BarChart {
        title: SAVINGS_RATE_TITLE,
        labels: MONTHS.to_vec(),
        values: results.iter().map(|r| r.savings_rate).collect(),
    }
}

fn cashflow_chart(results: &[MonthlyResult; 12]) -> LineChart {
    LineChart {
        title: CASHFLOW_TITLE,
        labels: MONTHS.to_vec(),
        series: vec![
            LineSeries {
                name: "Income",
                values: results.iter().map(|r| r.income).collect(),
            },
            LineSeries {
                name: "Needs",
                values: results.iter().map(|r| r.needs).collect(),
            },
            LineSeries {
                name: "Wants",
                values: results.iter().map(|r| r.wants).collect(),
            },
        ],
    }
}

fn allocation_chart(totals: &YearlyTotals) -> PieChart {
    let grand_total = totals.total();
    let parts = [
        ("Needs", totals.needs),
        ("Wants", totals.wants),
        ("Invested", totals.invested),
        ("Savings", totals.savings),
    ];

    let slices = parts
        .into_iter()
        .zip(SLICE_COLORS)
        .map(|((label, total), color)| {
            // An empty year has nothing to divide; every slice reads 0%.
            let percent = if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            };
            PieSlice {
                label,
                total,
                percent,
                percent_label: format!("{percent:.1}%"),
                color,
            }
        })
        .collect();

    PieChart {
        title: ALLOCATION_TITLE,
        slices,
    }
}

pub fn render_table(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>18}  {}",
        "Month", "Income", "Needs", "Wants", "Savings", "Invested", "Savings Rate (%)", "Category"
    );
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:<5} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>18}  {}",
            row.month,
            row.income,
            row.needs,
            row.wants,
            row.savings,
            row.invested,
            row.savings_rate_label,
            row.category
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.allocation_chart.title);
    for slice in &report.allocation_chart.slices {
        let _ = writeln!(
            out,
            "  {:<9} {:>14.2} {:>7}",
            slice.label, slice.total, slice.percent_label
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MAX_AMOUNT, records_from_columns, run_allocation};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn flat_year(income: f64, needs: f64, wants: f64) -> Report {
        let records = records_from_columns(&[income; 12], &[needs; 12], &[wants; 12])
            .expect("valid year");
        build_report(&run_allocation(&records))
    }

    #[test]
    fn rows_format_rate_to_two_decimals() {
        let report = flat_year(3000.0, 1000.0, 1000.0);
        assert_eq!(report.rows.len(), 12);
        let jan = &report.rows[0];
        assert_eq!(jan.month, "Jan");
        assert_eq!(jan.savings_rate_label, "33.33");
        assert_eq!(jan.category, "Very Good");
        assert_eq!(report.rows[11].month, "Dec");
    }

    #[test]
    fn zero_income_rows_render_na() {
        let report = flat_year(0.0, 0.0, 0.0);
        for row in &report.rows {
            assert_eq!(row.savings_rate, SavingsRate::Undefined);
            assert_eq!(row.savings_rate_label, "N/A");
            assert_eq!(row.category, "Too Risky");
        }
        assert!(report.savings_rate_chart.values.iter().all(|v| v.percent().is_none()));
    }

    #[test]
    fn cashflow_chart_has_three_series_in_month_order() {
        let report = flat_year(1000.0, 400.0, 300.0);
        let chart = &report.cashflow_chart;
        assert_eq!(chart.labels, MONTHS.to_vec());
        let names: Vec<&str> = chart.series.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Income", "Needs", "Wants"]);
        assert!(chart.series.iter().all(|s| s.values.len() == 12));
        assert_approx(chart.series[1].values[5], 400.0);
    }

    #[test]
    fn allocation_chart_uses_yearly_totals() {
        let report = flat_year(1000.0, 400.0, 300.0);
        let slices = &report.allocation_chart.slices;
        let labels: Vec<&str> = slices.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Needs", "Wants", "Invested", "Savings"]);

        assert_approx(slices[0].total, 4800.0);
        assert_approx(slices[1].total, 3600.0);
        assert_approx(slices[2].total, 1800.0);
        assert_approx(slices[3].total, 1800.0);
        assert_eq!(slices[0].percent_label, "40.0%");
        assert_eq!(slices[2].percent_label, "15.0%");

        let sum: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-6);
        assert_eq!(slices[3].color, "#ffcc99");
    }

    #[test]
    fn largest_accepted_year_keeps_finite_percentages() {
        let report = flat_year(MAX_AMOUNT, 0.0, 0.0);
        assert!(report.totals.total().is_finite());
        let labels: Vec<&str> = report
            .allocation_chart
            .slices
            .iter()
            .map(|s| s.percent_label.as_str())
            .collect();
        assert_eq!(labels, vec!["0.0%", "0.0%", "50.0%", "50.0%"]);
        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(!json.contains("null"));
    }

    #[test]
    fn allocation_chart_of_empty_year_is_all_zero() {
        let report = flat_year(0.0, 0.0, 0.0);
        for slice in &report.allocation_chart.slices {
            assert_eq!(slice.percent, 0.0);
            assert_eq!(slice.percent_label, "0.0%");
        }
    }

    #[test]
    fn report_serializes_camel_case_with_null_rate() {
        let report = flat_year(0.0, 0.0, 0.0);
        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(json.contains("\"rows\""));
        assert!(json.contains("\"savingsRateChart\""));
        assert!(json.contains("\"cashflowChart\""));
        assert!(json.contains("\"allocationChart\""));
        assert!(json.contains("\"totals\""));
        assert!(json.contains("\"savingsRate\":null"));
        assert!(json.contains("\"savingsRateLabel\":\"N/A\""));
    }

    #[test]
    fn render_table_lists_every_month_and_slice() {
        let report = flat_year(1000.0, 400.0, 300.0);
        let text = render_table(&report);
        assert!(text.starts_with("Month"));
        for month in MONTHS {
            assert!(text.contains(month), "missing {month}");
        }
        assert!(text.contains("30.00"));
        assert!(text.contains("Safe"));
        assert!(text.contains("Total Yearly Allocation"));
        assert!(text.contains("40.0%"));
        // header + 12 months + blank + title + 4 slices
        assert_eq!(text.lines().count(), 19);
    }
}
