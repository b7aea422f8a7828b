//! Chart payload builders (the reporting adapter)
//!
//! Turns aggregation output into the structured payloads a chart renderer
//! needs: rows, series, data labels, axis labels, title. No pixels here;
//! rendering belongs to the display sink.
//!
//! Two labelling rules worth naming:
//! - stacked expense segments get a data label only when non-zero, while the
//!   income/expense/balance bars are always labelled;
//! - dense time axes are compressed: the first tick and every period that
//!   opens a month (or a year, for monthly axes) keeps its full label, every
//!   other tick shrinks to its day or month component.

use chrono::{Datelike, NaiveDate};

use crate::models::{Category, Money};
use crate::repository::LedgerSelection;

use super::balance::{BalanceRow, BalanceSummary};
use super::pivot::{CategoryPivot, Granularity, Period};
use super::totals::CategoryTotals;

/// Shared y-axis caption of both bar charts
const AMOUNT_AXIS: &str = "Amount (C$)";

/// How a bar chart's series are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    /// Segments stacked per period (category breakdown)
    Stacked,
    /// Bars side by side per period (income/expense/balance)
    Grouped,
}

/// One named series with a value and an optional data label per period
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Money>,
    /// `None` means the renderer should not label that segment
    pub labels: Vec<Option<String>>,
}

/// A finalized bar-chart payload
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: BarKind,
    /// One compressed tick label per period
    pub tick_labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// One pie slice with its share of the whole (percent)
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: Money,
    pub share: f64,
}

/// A finalized pie-chart payload
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// Build the category-share pie payload from Stage C totals
pub fn expense_pie(totals: &CategoryTotals, selection: &LedgerSelection) -> PieChart {
    let title = match selection {
        LedgerSelection::Named(name) => format!("{} Expense Summary by Category", name),
        LedgerSelection::All => "Expense Summary by Category".to_string(),
    };

    let sum = totals.sum();
    let slices = totals
        .totals
        .iter()
        .map(|t| PieSlice {
            label: t.category.label(),
            value: t.total,
            share: if sum.is_zero() {
                0.0
            } else {
                t.total.cents() as f64 / sum.cents() as f64 * 100.0
            },
        })
        .collect();

    PieChart { title, slices }
}

/// Build the stacked expense-bar payload from a Stage A pivot
///
/// The `rent` and `income` columns are excluded. Daily pivots are first
/// expanded to a contiguous day axis so gaps show as empty periods.
pub fn expense_stacked_bar(pivot: &CategoryPivot, selection: &LedgerSelection) -> BarChart {
    let filled;
    let pivot = match pivot.granularity {
        Granularity::Daily => {
            filled = pivot.clone().into_contiguous_days();
            &filled
        }
        Granularity::Monthly => pivot,
    };

    let title = match selection {
        LedgerSelection::Named(name) => format!("{} Daily Expense Summary", name),
        LedgerSelection::All => "Monthly Expense Summary".to_string(),
    };

    let series = Category::SCHEMA
        .iter()
        .filter(|category| !matches!(category, Category::Rent | Category::Income))
        .map(|&category| {
            let values: Vec<Money> = pivot
                .rows
                .iter()
                .map(|row| row.total_for(category))
                .collect();
            // Zero-height segments stay unlabelled
            let labels = values
                .iter()
                .map(|v| (!v.is_zero()).then(|| v.to_string()))
                .collect();
            ChartSeries {
                name: category.label().to_string(),
                values,
                labels,
            }
        })
        .collect();

    BarChart {
        title,
        x_label: "Date".to_string(),
        y_label: AMOUNT_AXIS.to_string(),
        kind: BarKind::Stacked,
        tick_labels: period_ticks(&pivot.rows.iter().map(|r| r.period).collect::<Vec<_>>()),
        series,
    }
}

/// Build the grouped income/expense/balance payload from a Stage B summary
///
/// Any trailing `TOTAL` row is excluded; every bar carries a data label,
/// zero or not.
pub fn balance_bar(summary: &BalanceSummary, selection: &LedgerSelection) -> BarChart {
    let title = match selection {
        LedgerSelection::Named(name) => format!("{} Balance Summary", name),
        LedgerSelection::All => "Monthly Balance Summary".to_string(),
    };

    let rows = summary.period_rows();
    let columns: [(&str, fn(&BalanceRow) -> Money); 3] = [
        ("Income", |r| r.income),
        ("Expense", |r| r.expense),
        ("Balance", |r| r.balance),
    ];

    let series = columns
        .iter()
        .map(|(name, pick)| {
            let values: Vec<Money> = rows.iter().map(|r| pick(r)).collect();
            let labels = values.iter().map(|v| Some(v.to_string())).collect();
            ChartSeries {
                name: name.to_string(),
                values,
                labels,
            }
        })
        .collect();

    let months: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();

    BarChart {
        title,
        x_label: "Month".to_string(),
        y_label: AMOUNT_AXIS.to_string(),
        kind: BarKind::Grouped,
        tick_labels: compress_monthly_ticks(&months),
        series,
    }
}

fn period_ticks(periods: &[Period]) -> Vec<String> {
    let mut dates = Vec::new();
    let mut months = Vec::new();
    for period in periods {
        match period {
            Period::Day(date) => dates.push(*date),
            Period::Month { .. } => months.push(period.to_string()),
        }
    }
    if !dates.is_empty() {
        compress_daily_ticks(&dates)
    } else {
        compress_monthly_ticks(&months)
    }
}

/// Compress a daily axis: the first tick and every month-opening day keep the
/// full `YYYY Mon DD` form, every other tick is just the zero-padded day.
pub fn compress_daily_ticks(dates: &[NaiveDate]) -> Vec<String> {
    dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            if i == 0 || date.day() == 1 {
                date.format("%Y %b %d").to_string()
            } else {
                date.format("%d").to_string()
            }
        })
        .collect()
}

/// Compress a monthly axis: the first tick and every January keep the full
/// `YYYY-MM` form, every other tick is just the month component.
pub fn compress_monthly_ticks<S: AsRef<str>>(months: &[S]) -> Vec<String> {
    months
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let month = month.as_ref();
            let component = month.rsplit('-').next().unwrap_or(month);
            if i == 0 || component == "01" {
                month.to_string()
            } else {
                component.to_string()
            }
        })
        .collect()
}
