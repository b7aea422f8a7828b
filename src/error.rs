//! Custom error types for the expense ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Malformed user input (bad date, amount, or menu index)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl LedgerError {
    /// Create an "invalid input" error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a "not found" error for ledgers
    pub fn ledger_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ledger",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for store rows
    pub fn row_not_found(position: u32) -> Self {
        Self::NotFound {
            entity_type: "Row",
            identifier: position.to_string(),
        }
    }

    /// Create a "duplicate" error for ledgers
    pub fn ledger_exists(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Ledger",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a "duplicate" error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Errors that abort only the current operation rather than the session:
    /// the selected ledger or row vanished, or a name collided. Everything
    /// else (storage, I/O, JSON) is fatal once the store has been opened.
    pub fn aborts_operation_only(&self) -> bool {
        self.is_not_found() || self.is_duplicate()
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
