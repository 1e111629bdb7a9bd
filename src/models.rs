use chrono::NaiveDate;

use crate::error::{InventoryError, Result};

/// Unit assigned when a record does not specify one
pub const DEFAULT_UNIT: &str = "pcs";

/// Low-stock threshold assigned when a record does not specify one
pub const DEFAULT_THRESHOLD: i64 = 5;

/// A persisted medicine record.
///
/// `id` is assigned by the store on insert and never changes afterwards.
/// `quantity` and `threshold` are kept non-negative by manual-entry
/// validation and by the importer's field defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub batch: Option<String>,
    pub quantity: i64,
    pub unit: String,
    /// No expiry when absent
    pub expiry_date: Option<NaiveDate>,
    pub threshold: i64,
    pub notes: Option<String>,
}

/// A medicine record that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub batch: Option<String>,
    pub quantity: i64,
    pub unit: String,
    pub expiry_date: Option<NaiveDate>,
    pub threshold: i64,
    pub notes: Option<String>,
}

impl Default for NewMedicine {
    fn default() -> Self {
        NewMedicine {
            name: String::new(),
            batch: None,
            quantity: 0,
            unit: DEFAULT_UNIT.to_string(),
            expiry_date: None,
            threshold: DEFAULT_THRESHOLD,
            notes: None,
        }
    }
}

fn validate_fields(name: &str, quantity: i64, threshold: i64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(InventoryError::Validation("Name must not be empty".to_string()));
    }
    if quantity < 0 {
        return Err(InventoryError::Validation(format!(
            "Quantity must not be negative (got {quantity})"
        )));
    }
    if threshold < 0 {
        return Err(InventoryError::Validation(format!(
            "Threshold must not be negative (got {threshold})"
        )));
    }
    Ok(())
}

impl NewMedicine {
    /// Checks the manual-entry rules: non-empty name, non-negative quantity
    /// and threshold. Called before any store mutation.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, self.quantity, self.threshold)
    }
}

impl Medicine {
    /// Same rules as [`NewMedicine::validate`], for full-record edits.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, self.quantity, self.threshold)
    }

    /// Returns true if the expiry date is strictly before `today`.
    /// Records without an expiry date never expire.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.map(|d| d < today).unwrap_or(false)
    }

    /// Days until expiry relative to `today`; negative once expired,
    /// `None` when the record has no expiry date.
    pub fn days_to_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }

    /// Returns true when stock is at or below the configured threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.threshold
    }
}
