//! SQLite-backed record store for medicine inventory.
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! All access goes through an explicit [`MedicineStore`] handle; there is no
//! process-wide connection. Batch inserts are transactional so one import
//! submission commits together.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{InventoryError, Result};
use crate::models::{Medicine, NewMedicine};

const SELECT_COLUMNS: &str = "id, name, batch, quantity, unit, expiry_date, threshold, notes";

/// Handle to the medicine database.
pub struct MedicineStore {
    conn: Connection,
}

/// Creates the `medicines` table if it does not already exist.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS medicines (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            batch       TEXT,
            quantity    INTEGER NOT NULL DEFAULT 0,
            unit        TEXT NOT NULL DEFAULT 'pcs',
            expiry_date TEXT,
            threshold   INTEGER NOT NULL DEFAULT 5,
            notes       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_medicines_name ON medicines(name);",
    )
}

/// Dates are stored as `YYYY-MM-DD` text, absent as NULL.
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn row_to_medicine(row: &Row<'_>) -> rusqlite::Result<Medicine> {
    let expiry: Option<String> = row.get(5)?;
    Ok(Medicine {
        id: row.get(0)?,
        name: row.get(1)?,
        batch: row.get(2)?,
        quantity: row.get(3)?,
        unit: row.get(4)?,
        expiry_date: expiry.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        threshold: row.get(6)?,
        notes: row.get(7)?,
    })
}

impl MedicineStore {
    /// Opens (or creates) the database at `path` and initialises the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        log::debug!("Opened medicine store: {}", path.display());
        Ok(MedicineStore { conn })
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(MedicineStore { conn })
    }

    /// Inserts a record and returns the id the store assigned to it.
    pub fn insert(&self, med: &NewMedicine) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO medicines (name, batch, quantity, unit, expiry_date, threshold, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                med.name,
                med.batch,
                med.quantity,
                med.unit,
                med.expiry_date.map(format_date),
                med.threshold,
                med.notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts a batch of records inside one transaction.
    ///
    /// Returns the number of rows inserted. Either every row lands or,
    /// on a database error, none do.
    pub fn insert_batch(&mut self, meds: &[NewMedicine]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut count = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO medicines (name, batch, quantity, unit, expiry_date, threshold, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for med in meds {
                stmt.execute(params![
                    med.name,
                    med.batch,
                    med.quantity,
                    med.unit,
                    med.expiry_date.map(format_date),
                    med.threshold,
                    med.notes,
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("Inserted {} medicines into store", count);
        Ok(count)
    }

    /// Full-record update. The id itself is immutable.
    pub fn update(&self, med: &Medicine) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE medicines
             SET name = ?1, batch = ?2, quantity = ?3, unit = ?4,
                 expiry_date = ?5, threshold = ?6, notes = ?7
             WHERE id = ?8",
            params![
                med.name,
                med.batch,
                med.quantity,
                med.unit,
                med.expiry_date.map(format_date),
                med.threshold,
                med.notes,
                med.id,
            ],
        )?;
        if affected == 0 {
            return Err(InventoryError::NotFound(med.id));
        }
        Ok(())
    }

    /// Deletes a record by id.
    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM medicines WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(InventoryError::NotFound(id));
        }
        Ok(())
    }

    /// Fetches a single record by id.
    pub fn get(&self, id: i64) -> Result<Medicine> {
        let med = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM medicines WHERE id = ?1"),
                params![id],
                row_to_medicine,
            )
            .optional()?;
        med.ok_or(InventoryError::NotFound(id))
    }

    /// Returns all records ordered by name (case-insensitive), the iteration
    /// order every derived view inherits.
    pub fn list_all(&self) -> Result<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM medicines ORDER BY name COLLATE NOCASE, id"
        ))?;
        let meds = stmt
            .query_map([], row_to_medicine)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(meds)
    }

    /// Case-insensitive name substring search, ordered by name.
    pub fn search(&self, fragment: &str) -> Result<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM medicines
             WHERE name LIKE '%' || ?1 || '%'
             ORDER BY name COLLATE NOCASE, id"
        ))?;
        let meds = stmt
            .query_map(params![fragment], row_to_medicine)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(meds)
    }
}
