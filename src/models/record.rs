//! Transaction record model
//!
//! One dated, categorized, signed monetary entry with a free-text note.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Transaction date
    pub date: NaiveDate,

    /// Category, chosen from the closed set at entry time
    pub category: Category,

    /// Amount; negative for every category except income
    pub amount: Money,

    /// Free-text note
    #[serde(default)]
    pub note: String,
}

impl Record {
    /// Create a record, imposing the category sign convention on `amount`.
    ///
    /// The sign is fixed here, at entry time, and never re-derived later.
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Money,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category,
            amount: category.signed(amount),
            note: note.into(),
        }
    }

    /// Sort key for display ordering: (date, category, amount, note) ascending
    pub fn sort_key(&self) -> (NaiveDate, &'static str, Money, &str) {
        (self.date, self.category.label(), self.amount, &self.note)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}
