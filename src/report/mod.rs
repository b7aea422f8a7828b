//! Aggregation and reporting engine
//!
//! The three-stage pipeline from raw records to chart-ready payloads:
//! Stage A pivots records into a period × category table, Stage B reduces
//! them to monthly income/expense/balance rows, Stage C collapses the pivot
//! into per-category totals. `chart` packages each stage for a renderer.

pub mod balance;
pub mod chart;
pub mod pivot;
pub mod totals;

pub use balance::{BalanceRow, BalanceSummary, TOTAL_LABEL};
pub use chart::{
    balance_bar, compress_daily_ticks, compress_monthly_ticks, expense_pie, expense_stacked_bar,
    BarChart, BarKind, ChartSeries, PieChart, PieSlice,
};
pub use pivot::{CategoryPivot, Granularity, Period, PivotRow};
pub use totals::{CategoryTotal, CategoryTotals};
