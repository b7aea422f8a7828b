//! Tabular terminal formatting
//!
//! Formats ranked ledger views and balance summaries for display. Amounts
//! are rendered to two decimals here; the aggregation layer never rounds.

use crate::report::BalanceSummary;
use crate::repository::LedgerView;

/// Format a ranked ledger view as a table
///
/// The leading column is the display rank the user selects rows by.
pub fn format_ledger_table(view: &LedgerView) -> String {
    if view.is_empty() {
        return "No records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<10}  {:<14}  {:>12}  {}\n",
        "", "Date", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for entry in view.entries() {
        let record = &entry.record;
        output.push_str(&format!(
            "{:>4}  {:<10}  {:<14}  {:>12}  {}\n",
            entry.rank,
            record.date.format("%Y-%m-%d").to_string(),
            record.category.label(),
            record.amount.to_string(),
            record.note
        ));
    }

    output
}

/// Format a balance summary as a table (including any trailing TOTAL row)
pub fn format_balance_table(summary: &BalanceSummary) -> String {
    if summary.is_empty() {
        return "No records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:>12}  {:>12}  {:>12}\n",
        "Month", "Income", "Expense", "Balance"
    ));
    output.push_str(&"-".repeat(50));
    output.push('\n');

    for row in &summary.rows {
        output.push_str(&format!(
            "{:<8}  {:>12}  {:>12}  {:>12}\n",
            row.period,
            row.income.to_string(),
            row.expense.to_string(),
            row.balance.to_string()
        ));
    }

    output
}

/// Format a 1-based ledger name listing
pub fn format_ledger_list(names: &[String]) -> String {
    let mut output = String::new();
    for (index, name) in names.iter().enumerate() {
        output.push_str(&format!("{}: {}\n", index + 1, name));
    }
    output
}
