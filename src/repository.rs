//! Record repository
//!
//! Materializes one ledger (or the union of all ledgers) as a sorted,
//! display-ranked collection. Views are re-fetched from the store on every
//! load and never cached across calls, so a view always reflects the latest
//! committed state.

use std::fmt;

use crate::error::LedgerResult;
use crate::models::Record;
use crate::store::{LedgerStore, FIRST_DATA_ROW};

/// Which ledger a view or operation targets
///
/// "All Ledgers" is a derived read-only view, never a stored entry; it has no
/// row-position semantics, so deletion is structurally impossible against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSelection {
    /// A single named ledger
    Named(String),
    /// The union of every ledger
    All,
}

impl LedgerSelection {
    /// User-facing name of the selection
    pub fn label(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::All => "All Ledgers",
        }
    }

    /// Check if this is the cross-ledger union view
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for LedgerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One record with its display rank and, for single-ledger views, the store
/// row position it maps back to
#[derive(Debug, Clone)]
pub struct RankedRecord {
    /// 1-based position after sorting; what the user selects by
    pub rank: usize,
    /// Underlying store row position; `None` for the union view
    pub position: Option<u32>,
    /// The record itself
    pub record: Record,
}

/// A sorted, ranked snapshot of a ledger or of all ledgers
#[derive(Debug, Clone)]
pub struct LedgerView {
    selection: LedgerSelection,
    entries: Vec<RankedRecord>,
}

impl LedgerView {
    /// Fetch a fresh view from the store and rank it
    ///
    /// Records are sorted by `(date, category, amount, note)` ascending with
    /// a stable sort, then numbered 1..n. For a named ledger each entry keeps
    /// the store position it occupied before sorting.
    pub fn load(store: &dyn LedgerStore, selection: &LedgerSelection) -> LedgerResult<Self> {
        let records = match selection {
            LedgerSelection::Named(name) => store.read(name)?,
            LedgerSelection::All => store.read_all()?,
        };

        let mut entries: Vec<RankedRecord> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| RankedRecord {
                rank: 0,
                position: match selection {
                    LedgerSelection::Named(_) => Some(index as u32 + FIRST_DATA_ROW),
                    LedgerSelection::All => None,
                },
                record,
            })
            .collect();

        entries.sort_by(|a, b| a.record.sort_key().cmp(&b.record.sort_key()));
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        Ok(Self {
            selection: selection.clone(),
            entries,
        })
    }

    /// The selection this view was loaded for
    pub fn selection(&self) -> &LedgerSelection {
        &self.selection
    }

    /// Ranked entries in display order
    pub fn entries(&self) -> &[RankedRecord] {
        &self.entries
    }

    /// Records in display order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Map a display rank back to the store row it pointed to at load time;
    /// `None` for out-of-range ranks and always `None` for the union view
    pub fn position_of_rank(&self, rank: usize) -> Option<u32> {
        self.entries.get(rank.checked_sub(1)?)?.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
