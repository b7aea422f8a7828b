//! Balance summary (Stage B of the aggregation pipeline)
//!
//! Splits records into income and expense per month, outer-joins the two
//! sides on period with zero fill, and derives `balance = income − expense`.
//! Expense is held as a magnitude; only `balance` may go negative.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{Money, Record};

/// Period label of the synthetic trailing row on cross-ledger summaries
pub const TOTAL_LABEL: &str = "TOTAL";

/// One summary row: a `YYYY-MM` period (or [`TOTAL_LABEL`]) with its totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRow {
    pub period: String,
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

/// Per-month income/expense/balance rows, ascending by period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    pub rows: Vec<BalanceRow>,
}

impl BalanceSummary {
    /// Summarize a record sequence by month
    ///
    /// A month present on only one side of the income/expense split still
    /// gets a row, with the missing side filled as zero.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut months: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();
        for record in records {
            let key = (record.date.year(), record.date.month());
            let (income, expense) = months.entry(key).or_default();
            if record.category.is_income() {
                *income += record.amount.abs();
            } else {
                *expense += record.amount.abs();
            }
        }

        let rows = months
            .into_iter()
            .map(|((year, month), (income, expense))| BalanceRow {
                period: format!("{:04}-{:02}", year, month),
                income,
                expense,
                balance: income - expense,
            })
            .collect();

        Self { rows }
    }

    /// Append the synthetic `TOTAL` row: the column-wise sum of every period
    ///
    /// Used for cross-ledger views only.
    pub fn with_total(mut self) -> Self {
        let income: Money = self.rows.iter().map(|r| r.income).sum();
        let expense: Money = self.rows.iter().map(|r| r.expense).sum();
        self.rows.push(BalanceRow {
            period: TOTAL_LABEL.to_string(),
            income,
            expense,
            balance: income - expense,
        });
        self
    }

    /// Rows excluding any trailing `TOTAL`
    pub fn period_rows(&self) -> &[BalanceRow] {
        match self.rows.last() {
            Some(last) if last.period == TOTAL_LABEL => &self.rows[..self.rows.len() - 1],
            _ => &self.rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
