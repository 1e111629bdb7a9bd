//! CSV exporter for inventory records.
//!
//! The export format is stable: a fixed header, records in store order
//! (name order), dates as YYYY-MM-DD and absent fields as empty strings.
//! A round trip through the importer reproduces the records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use log::info;

use crate::error::Result;
use crate::models::Medicine;

/// Column order of every export
pub const EXPORT_HEADER: [&str; 8] = [
    "id",
    "name",
    "batch",
    "quantity",
    "unit",
    "expiry_date",
    "threshold",
    "notes",
];

/// Default file name when the caller does not pick one
pub const EXPORT_FILE_NAME: &str = "medicines.csv";

/// Writes `meds` as CSV to `path`.
///
/// # Arguments
/// * `meds` - Records to export, already in the desired order
/// * `path` - Destination file, created or truncated
pub fn export_file<P: AsRef<Path>>(meds: &[Medicine], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_medicines(meds, file)?;
    info!("Exported {} medicines to {}", meds.len(), path.display());
    Ok(())
}

/// Writes `meds` as CSV to any sink.
pub fn write_medicines<W: Write>(meds: &[Medicine], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;

    for med in meds {
        let expiry = med
            .expiry_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        wtr.write_record([
            med.id.to_string(),
            med.name.clone(),
            med.batch.clone().unwrap_or_default(),
            med.quantity.to_string(),
            med.unit.clone(),
            expiry,
            med.threshold.to_string(),
            med.notes.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders `meds` as an in-memory CSV string.
pub fn export_string(meds: &[Medicine]) -> Result<String> {
    let mut buf = Vec::new();
    write_medicines(meds, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
