//! CSV importer for inventory records.
//!
//! The importer is deliberately lenient at the field level: a defective cell
//! degrades to the documented default for that field, and a row without a
//! usable name is skipped. Only input that cannot be read as tabular data at
//! all fails the batch, in which case nothing is inserted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{NewMedicine, DEFAULT_THRESHOLD, DEFAULT_UNIT};
use crate::store::MedicineStore;

pub mod field_parsers;

use field_parsers::{normalize_optional, parse_count, parse_expiry_date};

/// One raw CSV row. Every field is optional so that files with missing
/// columns still deserialize; defaults are applied afterwards.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    batch: Option<String>,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    expiry_date: Option<String>,
    #[serde(default)]
    threshold: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Outcome of a completed import.
#[derive(Debug, Default, PartialEq)]
pub struct ImportStats {
    /// Rows inserted into the store
    pub inserted: usize,
    /// Rows skipped for lack of a name
    pub skipped: usize,
}

/// Imports medicines from a CSV file at `path`.
///
/// # Arguments
/// * `store` - The store receiving the records
/// * `path` - Path to a CSV file with an `id,name,batch,...` style header
///
/// # Returns
/// Counts of inserted and skipped rows. On a read or parse failure the
/// store is left untouched.
pub fn import_file<P: AsRef<Path>>(store: &mut MedicineStore, path: P) -> Result<ImportStats> {
    let path = path.as_ref();
    info!("Importing medicines from {}", path.display());
    let file = File::open(path)?;
    import_reader(store, file)
}

/// Imports medicines from any CSV source.
///
/// All rows are parsed before anything is written, then the usable rows are
/// inserted in a single transaction. A malformed record mid-file therefore
/// aborts the whole batch with zero insertions.
pub fn import_reader<R: Read>(store: &mut MedicineStore, reader: R) -> Result<ImportStats> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut batch = Vec::new();
    let mut stats = ImportStats::default();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        let line = idx + 2; // header is line 1
        match build_medicine(row) {
            Some(med) => batch.push(med),
            None => {
                debug!("Skipping line {line}: no name");
                stats.skipped += 1;
            }
        }
    }

    stats.inserted = store.insert_batch(&batch)?;
    info!(
        "Imported {} medicines ({} rows skipped)",
        stats.inserted, stats.skipped
    );
    Ok(stats)
}

/// Turns a raw row into an insertable record, or `None` when the row has
/// no usable name.
fn build_medicine(row: RawRow) -> Option<NewMedicine> {
    let name = row.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return None;
    }

    Some(NewMedicine {
        name,
        batch: normalize_optional(row.batch),
        quantity: parse_count(row.quantity.as_deref(), 0, "quantity"),
        unit: normalize_optional(row.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        expiry_date: row.expiry_date.as_deref().and_then(parse_expiry_date),
        threshold: parse_count(row.threshold.as_deref(), DEFAULT_THRESHOLD, "threshold"),
        notes: normalize_optional(row.notes),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
