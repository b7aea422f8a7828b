//! Ledger store layer
//!
//! `LedgerStore` is the narrow contract the rest of the application holds
//! against persistent storage: list ledgers, read rows, append, delete a row
//! by position, create and delete ledgers. `JsonStore` is the default
//! implementation, keeping every ledger as a named sheet inside one JSON
//! workbook file written atomically.

pub mod file_io;
pub mod json;

pub use file_io::{read_json, write_json_atomic};
pub use json::{JsonStore, DEFAULT_STORE_FILE};

use crate::error::LedgerResult;
use crate::models::Record;

/// Store row positions are 1-based and count an implicit header row, so the
/// first data row of every ledger sits at position 2.
pub const FIRST_DATA_ROW: u32 = 2;

/// The storage contract the core requires
///
/// Every write is durable before the call returns; a subsequent read in the
/// same session always observes it.
pub trait LedgerStore {
    /// Ledger names in creation order
    fn list_ledgers(&self) -> LedgerResult<Vec<String>>;

    /// All rows of one ledger, in insertion order
    fn read(&self, name: &str) -> LedgerResult<Vec<Record>>;

    /// The union of every ledger's rows, in ledger-then-insertion order
    fn read_all(&self) -> LedgerResult<Vec<Record>>;

    /// Append a row to a ledger
    fn append(&self, name: &str, record: Record) -> LedgerResult<()>;

    /// Delete the row at a 1-based store position (first data row is
    /// [`FIRST_DATA_ROW`]); rows below it shift up
    fn delete_row(&self, name: &str, position: u32) -> LedgerResult<()>;

    /// Create an empty ledger (header only)
    fn create_ledger(&self, name: &str) -> LedgerResult<()>;

    /// Delete a ledger and all its rows
    fn delete_ledger(&self, name: &str) -> LedgerResult<()>;
}
