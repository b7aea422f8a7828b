//! Input validation utilities
//!
//! Parses free-form prompt answers into dates, amounts, and menu indexes.
//! Failures here never propagate past a prompt: the console re-asks the same
//! question until the answer parses (or the user cancels).

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Parse a date in exactly the 8-digit `YYYYMMDD` form
pub fn parse_date(text: &str) -> LedgerResult<NaiveDate> {
    let text = text.trim();
    if text.len() != 8 || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::invalid_input(format!(
            "expected YYYYMMDD, got '{}'",
            text
        )));
    }
    NaiveDate::parse_from_str(text, "%Y%m%d")
        .map_err(|_| LedgerError::invalid_input(format!("'{}' is not a calendar date", text)))
}

/// Parse a signed decimal amount; no range limits
pub fn parse_amount(text: &str) -> LedgerResult<Money> {
    Money::parse(text).map_err(|e| LedgerError::invalid_input(e.to_string()))
}

/// Parse a 1-based menu choice in `[1, max]`
///
/// Only digit strings are accepted, so "2x" and "-1" fail rather than
/// partially parse.
pub fn parse_choice(text: &str, max: usize) -> LedgerResult<usize> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::invalid_input(format!(
            "expected a number between 1 and {}",
            max
        )));
    }
    match text.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(LedgerError::invalid_input(format!(
            "expected a number between 1 and {}",
            max
        ))),
    }
}
