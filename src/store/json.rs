//! JSON workbook store
//!
//! The default [`LedgerStore`] implementation. All ledgers live in a single
//! workbook file: an array of named sheets, each holding its rows in
//! insertion order. Every operation re-reads the file and every mutation is
//! written back atomically before returning, so a read always observes prior
//! writes and external edits between operations are picked up.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Record;

use super::file_io::{read_json, write_json_atomic};
use super::{LedgerStore, FIRST_DATA_ROW};

/// Default workbook file name, resolved against the working directory
pub const DEFAULT_STORE_FILE: &str = "expense.json";

/// One named ledger inside the workbook
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Sheet {
    name: String,
    #[serde(default)]
    rows: Vec<Record>,
}

/// The whole workbook: every ledger, in creation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Workbook {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

impl Workbook {
    fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }
}

/// JSON-file backed ledger store
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open a store at `path`, creating an empty workbook file if none exists
    ///
    /// This is the one place a missing backing file is recovered from; after
    /// a successful open, a vanished or corrupt file surfaces as a storage
    /// error from whichever operation hits it.
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            store.save(&Workbook::default())?;
        }
        Ok(store)
    }

    /// Path of the backing workbook file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> LedgerResult<Workbook> {
        read_json(&self.path)
    }

    fn save(&self, workbook: &Workbook) -> LedgerResult<()> {
        write_json_atomic(&self.path, workbook)
    }
}

impl LedgerStore for JsonStore {
    fn list_ledgers(&self) -> LedgerResult<Vec<String>> {
        let workbook = self.load()?;
        Ok(workbook.sheets.into_iter().map(|s| s.name).collect())
    }

    fn read(&self, name: &str) -> LedgerResult<Vec<Record>> {
        let workbook = self.load()?;
        let sheet = workbook
            .sheet(name)
            .ok_or_else(|| LedgerError::ledger_not_found(name))?;
        Ok(sheet.rows.clone())
    }

    fn read_all(&self) -> LedgerResult<Vec<Record>> {
        let workbook = self.load()?;
        Ok(workbook
            .sheets
            .into_iter()
            .flat_map(|s| s.rows)
            .collect())
    }

    fn append(&self, name: &str, record: Record) -> LedgerResult<()> {
        let mut workbook = self.load()?;
        let sheet = workbook
            .sheet_mut(name)
            .ok_or_else(|| LedgerError::ledger_not_found(name))?;
        sheet.rows.push(record);
        self.save(&workbook)
    }

    fn delete_row(&self, name: &str, position: u32) -> LedgerResult<()> {
        let mut workbook = self.load()?;
        let sheet = workbook
            .sheet_mut(name)
            .ok_or_else(|| LedgerError::ledger_not_found(name))?;

        let index = position
            .checked_sub(FIRST_DATA_ROW)
            .map(|i| i as usize)
            .filter(|&i| i < sheet.rows.len())
            .ok_or_else(|| LedgerError::row_not_found(position))?;

        sheet.rows.remove(index);
        self.save(&workbook)
    }

    fn create_ledger(&self, name: &str) -> LedgerResult<()> {
        let mut workbook = self.load()?;
        if workbook.sheet(name).is_some() {
            return Err(LedgerError::ledger_exists(name));
        }
        workbook.sheets.push(Sheet {
            name: name.to_string(),
            rows: Vec::new(),
        });
        self.save(&workbook)
    }

    fn delete_ledger(&self, name: &str) -> LedgerResult<()> {
        let mut workbook = self.load()?;
        let before = workbook.sheets.len();
        workbook.sheets.retain(|s| s.name != name);
        if workbook.sheets.len() == before {
            return Err(LedgerError::ledger_not_found(name));
        }
        self.save(&workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open_test_store() -> (TempDir, JsonStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::open(temp_dir.path().join("expense.json")).unwrap();
        (temp_dir, store)
    }

    fn record(day: u32, category: Category, cents: i64, note: &str) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            category,
            Money::from_cents(cents),
            note,
        )
    }

    #[test]
    fn test_open_creates_empty_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expense.json");
        assert!(!path.exists());

        let store = JsonStore::open(&path).unwrap();
        assert!(path.exists());
        assert!(store.list_ledgers().unwrap().is_empty());
    }

    #[test]
    fn test_create_append_read() {
        let (_temp_dir, store) = open_test_store();

        store.create_ledger("March").unwrap();
        store
            .append("March", record(5, Category::Rent, 120000, "march rent"))
            .unwrap();
        store
            .append("March", record(6, Category::Grocery, 4500, "market"))
            .unwrap();

        let rows = store.read("March").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].note, "march rent");
        assert_eq!(rows[0].amount.cents(), -120000);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let (_temp_dir, store) = open_test_store();

        store.create_ledger("March").unwrap();
        let err = store.create_ledger("March").unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_read_missing_ledger_fails() {
        let (_temp_dir, store) = open_test_store();
        assert!(store.read("Nope").unwrap_err().is_not_found());
        assert!(store
            .append("Nope", record(1, Category::Other, 100, ""))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_row_positions_count_header() {
        let (_temp_dir, store) = open_test_store();

        store.create_ledger("March").unwrap();
        store
            .append("March", record(1, Category::Grocery, 1000, "first"))
            .unwrap();
        store
            .append("March", record(2, Category::Grocery, 2000, "second"))
            .unwrap();

        // First data row lives at position 2
        store.delete_row("March", 2).unwrap();
        let rows = store.read("March").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].note, "second");
    }

    #[test]
    fn test_delete_row_out_of_bounds() {
        let (_temp_dir, store) = open_test_store();
        store.create_ledger("March").unwrap();

        assert!(store.delete_row("March", 1).unwrap_err().is_not_found());
        assert!(store.delete_row("March", 2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_all_concatenates_in_ledger_order() {
        let (_temp_dir, store) = open_test_store();

        store.create_ledger("March").unwrap();
        store.create_ledger("April").unwrap();
        store
            .append("April", record(1, Category::Other, 100, "april"))
            .unwrap();
        store
            .append("March", record(1, Category::Other, 100, "march"))
            .unwrap();

        let all = store.read_all().unwrap();
        assert_eq!(all.len(), 2);
        // March was created first, so its rows come first
        assert_eq!(all[0].note, "march");
        assert_eq!(all[1].note, "april");
    }

    #[test]
    fn test_delete_ledger() {
        let (_temp_dir, store) = open_test_store();

        store.create_ledger("March").unwrap();
        store.delete_ledger("March").unwrap();
        assert!(store.list_ledgers().unwrap().is_empty());
        assert!(store.delete_ledger("March").unwrap_err().is_not_found());
    }

    #[test]
    fn test_writes_visible_to_fresh_handle() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expense.json");

        let store = JsonStore::open(&path).unwrap();
        store.create_ledger("March").unwrap();

        // A second handle over the same file sees the committed state
        let other = JsonStore::open(&path).unwrap();
        assert_eq!(other.list_ledgers().unwrap(), vec!["March".to_string()]);
    }
}
