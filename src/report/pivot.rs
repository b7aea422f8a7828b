//! Category pivot (Stage A of the aggregation pipeline)
//!
//! Groups records by (period, category), sums absolute amounts, and pivots
//! into one row per period with one column per category. The column set is
//! always the full fixed schema: categories absent from the data appear as
//! zero columns, and `other`/`income` sit last.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::{Category, Money, Record};

/// How records are bucketed into periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One row per calendar date (single-ledger views)
    Daily,
    /// One row per year-month (cross-ledger and summary views)
    Monthly,
}

/// An aggregation period: a calendar date or a year-month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Period {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl Period {
    /// Bucket a date at the given granularity
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => Self::Day(date),
            Granularity::Monthly => Self::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

/// One pivot row: a period plus a total per schema category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub period: Period,
    /// Absolute-amount totals, aligned with [`Category::SCHEMA`]
    pub totals: Vec<Money>,
}

impl PivotRow {
    fn empty(period: Period) -> Self {
        Self {
            period,
            totals: vec![Money::zero(); Category::SCHEMA.len()],
        }
    }

    /// Total for one category column
    pub fn total_for(&self, category: Category) -> Money {
        self.totals[category.schema_index()]
    }
}

/// The pivoted table: periods ascending, columns in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPivot {
    pub granularity: Granularity,
    pub rows: Vec<PivotRow>,
}

impl CategoryPivot {
    /// Pivot a record sequence
    pub fn from_records<'a, I>(records: I, granularity: Granularity) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut buckets: BTreeMap<Period, Vec<Money>> = BTreeMap::new();
        for record in records {
            let period = Period::of(record.date, granularity);
            let totals = buckets
                .entry(period)
                .or_insert_with(|| vec![Money::zero(); Category::SCHEMA.len()]);
            totals[record.category.schema_index()] += record.amount.abs();
        }

        let rows = buckets
            .into_iter()
            .map(|(period, totals)| PivotRow { period, totals })
            .collect();

        Self { granularity, rows }
    }

    /// Zero-fill every calendar day between the first and last period
    ///
    /// Only meaningful for daily pivots headed to a stacked-bar axis; a
    /// monthly pivot is returned unchanged.
    pub fn into_contiguous_days(self) -> Self {
        if self.granularity != Granularity::Daily || self.rows.is_empty() {
            return self;
        }

        let (first, last) = match (self.rows.first(), self.rows.last()) {
            (Some(PivotRow { period: Period::Day(a), .. }), Some(PivotRow { period: Period::Day(b), .. })) => (*a, *b),
            _ => return self,
        };

        let mut by_day: BTreeMap<NaiveDate, PivotRow> = self
            .rows
            .into_iter()
            .filter_map(|row| match row.period {
                Period::Day(date) => Some((date, row)),
                Period::Month { .. } => None,
            })
            .collect();

        let mut rows = Vec::new();
        let mut day = first;
        while day <= last {
            rows.push(
                by_day
                    .remove(&day)
                    .unwrap_or_else(|| PivotRow::empty(Period::Day(day))),
            );
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        Self {
            granularity: Granularity::Daily,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(y: i32, m: u32, d: u32, category: Category, cents: i64) -> Record {
        Record::new(date(y, m, d), category, Money::from_cents(cents), "")
    }

    #[test]
    fn test_daily_pivot_groups_and_takes_magnitudes() {
        let records = vec![
            record(2024, 3, 5, Category::Grocery, 1000),
            record(2024, 3, 5, Category::Grocery, 2500),
            record(2024, 3, 5, Category::Income, 100000),
            record(2024, 3, 7, Category::Rent, 120000),
        ];

        let pivot = CategoryPivot::from_records(&records, Granularity::Daily);
        assert_eq!(pivot.rows.len(), 2);

        let day5 = &pivot.rows[0];
        assert_eq!(day5.period, Period::Day(date(2024, 3, 5)));
        assert_eq!(day5.total_for(Category::Grocery).cents(), 3500);
        assert_eq!(day5.total_for(Category::Income).cents(), 100000);
        // Absent categories are zero-filled, not omitted
        assert_eq!(day5.total_for(Category::Rent).cents(), 0);

        let day7 = &pivot.rows[1];
        assert_eq!(day7.total_for(Category::Rent).cents(), 120000);
    }

    #[test]
    fn test_monthly_pivot_buckets_across_months() {
        let records = vec![
            record(2024, 1, 10, Category::Utility, 3000),
            record(2024, 1, 25, Category::Utility, 2000),
            record(2024, 2, 1, Category::Utility, 4000),
        ];

        let pivot = CategoryPivot::from_records(&records, Granularity::Monthly);
        assert_eq!(pivot.rows.len(), 2);
        assert_eq!(pivot.rows[0].period.to_string(), "2024-01");
        assert_eq!(pivot.rows[0].total_for(Category::Utility).cents(), 5000);
        assert_eq!(pivot.rows[1].total_for(Category::Utility).cents(), 4000);
    }

    #[test]
    fn test_periods_ascend() {
        let records = vec![
            record(2024, 3, 9, Category::Other, 100),
            record(2024, 3, 1, Category::Other, 100),
            record(2024, 3, 5, Category::Other, 100),
        ];

        let pivot = CategoryPivot::from_records(&records, Granularity::Daily);
        let days: Vec<String> = pivot.rows.iter().map(|r| r.period.to_string()).collect();
        assert_eq!(days, vec!["2024-03-01", "2024-03-05", "2024-03-09"]);
    }

    #[test]
    fn test_contiguous_days_fills_gaps_with_zeros() {
        let records = vec![
            record(2024, 3, 1, Category::Grocery, 1000),
            record(2024, 3, 4, Category::Grocery, 2000),
        ];

        let pivot =
            CategoryPivot::from_records(&records, Granularity::Daily).into_contiguous_days();
        let days: Vec<String> = pivot.rows.iter().map(|r| r.period.to_string()).collect();
        assert_eq!(
            days,
            vec!["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04"]
        );
        assert!(pivot.rows[1].totals.iter().all(|m| m.is_zero()));
        assert!(pivot.rows[2].totals.iter().all(|m| m.is_zero()));
    }

    #[test]
    fn test_contiguous_days_is_noop_for_monthly() {
        let records = vec![
            record(2024, 1, 1, Category::Grocery, 1000),
            record(2024, 4, 1, Category::Grocery, 1000),
        ];

        let pivot =
            CategoryPivot::from_records(&records, Granularity::Monthly).into_contiguous_days();
        assert_eq!(pivot.rows.len(), 2);
    }
}
