//! Medicine inventory tracking: a SQLite-backed store with expiry and
//! low-stock alerts plus CSV import and export.

pub mod alerts;
pub mod csv_export;
pub mod csv_import;
pub mod error;
pub mod models;
pub mod store;

pub use alerts::{
    check_expired_and_near_expiry, check_low_stock, ExpiryReport, NearExpiry,
    DEFAULT_EXPIRY_WINDOW_DAYS,
};
pub use csv_export::{export_file, EXPORT_FILE_NAME};
pub use csv_import::{import_file, ImportStats};
pub use error::{InventoryError, Result};
pub use models::{Medicine, NewMedicine, DEFAULT_THRESHOLD, DEFAULT_UNIT};
pub use store::MedicineStore;
