//! Interactive personal expense ledger
//!
//! A single-user, terminal-based expense tracker: dated, categorized records
//! go into named ledgers, and rolled-up views come back out as tables and
//! chart payloads.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, records)
//! - `validate`: Prompt-input parsing
//! - `store`: The ledger store contract and its JSON workbook implementation
//! - `repository`: Sorted, display-ranked ledger views
//! - `report`: The aggregation pipeline and chart payload builders
//! - `display`: Terminal formatting for tables and chart payloads
//! - `session`: The interactive state machine and its console

pub mod display;
pub mod error;
pub mod models;
pub mod report;
pub mod repository;
pub mod session;
pub mod store;
pub mod validate;

pub use error::{LedgerError, LedgerResult};
