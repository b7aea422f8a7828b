//! Category totals (Stage C of the aggregation pipeline)
//!
//! Collapses a pivot across periods into one total per expense category,
//! dropping the period axis and the `income` column. Feeds share charts.

use crate::models::{Category, Money};

use super::pivot::CategoryPivot;

/// One expense category with its total across all periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
}

/// Per-category totals in schema order, `income` excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotals {
    pub totals: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Sum each expense column of a pivot
    pub fn from_pivot(pivot: &CategoryPivot) -> Self {
        let totals = Category::SCHEMA
            .iter()
            .filter(|category| !category.is_income())
            .map(|&category| CategoryTotal {
                category,
                total: pivot
                    .rows
                    .iter()
                    .map(|row| row.total_for(category))
                    .sum(),
            })
            .collect();

        Self { totals }
    }

    /// Grand total across every category
    pub fn sum(&self) -> Money {
        self.totals.iter().map(|t| t.total).sum()
    }
}
