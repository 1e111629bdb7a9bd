//! Error types for the medicine inventory crate

use std::fmt;

/// Unified error type for store, import/export and validation operations
#[derive(Debug)]
pub enum InventoryError {
    /// Database operation failed
    Database(rusqlite::Error),
    /// Input could not be read as tabular CSV data
    Csv(csv::Error),
    /// File I/O error
    Io(std::io::Error),
    /// Manual entry violated a record rule; the store was not touched
    Validation(String),
    /// No record with the given id
    NotFound(i64),
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::Database(e) => write!(f, "Database error: {}", e),
            InventoryError::Csv(e) => write!(f, "CSV error: {}", e),
            InventoryError::Io(e) => write!(f, "I/O error: {}", e),
            InventoryError::Validation(msg) => write!(f, "Validation error: {}", msg),
            InventoryError::NotFound(id) => write!(f, "No medicine with id {}", id),
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryError::Database(e) => Some(e),
            InventoryError::Csv(e) => Some(e),
            InventoryError::Io(e) => Some(e),
            InventoryError::Validation(_) => None,
            InventoryError::NotFound(_) => None,
        }
    }
}

impl From<rusqlite::Error> for InventoryError {
    fn from(err: rusqlite::Error) -> Self {
        InventoryError::Database(err)
    }
}

impl From<csv::Error> for InventoryError {
    fn from(err: csv::Error) -> Self {
        InventoryError::Csv(err)
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Io(err)
    }
}

/// Result alias for medicine inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
