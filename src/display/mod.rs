//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger views, balance summaries, and
//! chart payloads for terminal display.

pub mod chart;
pub mod table;

pub use chart::{format_bar_chart, format_pie_chart};
pub use table::{format_balance_table, format_ledger_list, format_ledger_table};
