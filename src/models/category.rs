//! Expense categories
//!
//! The closed set of categories a record can carry. The set doubles as the
//! pivot column schema: `SCHEMA` fixes the column order, with `other` and
//! `income` always last.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Category of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries and food
    #[serde(rename = "grocery/food")]
    Grocery,
    /// Utility bills
    #[serde(rename = "utility")]
    Utility,
    /// Recurring monthly fees (subscriptions, memberships)
    #[serde(rename = "monthly fee")]
    MonthlyFee,
    /// Rent
    #[serde(rename = "rent")]
    Rent,
    /// Anything else
    #[serde(rename = "other")]
    Other,
    /// Income (the only non-negative category)
    #[serde(rename = "income")]
    Income,
}

impl Category {
    /// Fixed column schema for pivot tables; `other` and `income` are last.
    /// Also the order categories are listed for selection at entry time.
    pub const SCHEMA: [Category; 6] = [
        Category::Grocery,
        Category::Utility,
        Category::MonthlyFee,
        Category::Rent,
        Category::Other,
        Category::Income,
    ];

    /// Display label, as stored in the workbook
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grocery => "grocery/food",
            Self::Utility => "utility",
            Self::MonthlyFee => "monthly fee",
            Self::Rent => "rent",
            Self::Other => "other",
            Self::Income => "income",
        }
    }

    /// Position of this category in the pivot column schema
    pub fn schema_index(&self) -> usize {
        match self {
            Self::Grocery => 0,
            Self::Utility => 1,
            Self::MonthlyFee => 2,
            Self::Rent => 3,
            Self::Other => 4,
            Self::Income => 5,
        }
    }

    /// Look up a category by its 1-based menu index
    pub fn from_menu_index(index: usize) -> Option<Self> {
        (1..=Self::SCHEMA.len())
            .contains(&index)
            .then(|| Self::SCHEMA[index - 1])
    }

    /// Check if this is the income category
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    /// Impose the entry-time sign convention on an amount: income amounts are
    /// stored non-negative, every other category is stored non-positive.
    pub fn signed(&self, amount: Money) -> Money {
        if self.is_income() {
            amount.abs()
        } else {
            -amount.abs()
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
