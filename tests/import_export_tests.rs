//! End-to-end tests covering the file-backed store together with CSV
//! import and export.

use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use med_inventory::{csv_export, csv_import, MedicineStore, NewMedicine};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn import_from_file_populates_store() {
    let file = csv_file(
        "name,batch,quantity,unit,expiry_date,threshold,notes\n\
         Paracetamol,B-42,20,box,2026-03-01,5,painkiller\n\
         Ibuprofen,,50,pcs,2027-01-15,10,\n",
    );

    let mut store = MedicineStore::open_in_memory().unwrap();
    let stats = csv_import::import_file(&mut store, file.path()).unwrap();

    assert_eq!(stats.inserted, 2);
    assert_eq!(stats.skipped, 0);

    let meds = store.list_all().unwrap();
    assert_eq!(meds.len(), 2);
    assert_eq!(meds[0].name, "Ibuprofen");
    assert_eq!(meds[1].name, "Paracetamol");
    assert_eq!(meds[1].expiry_date, Some(date(2026, 3, 1)));
}

#[test]
fn missing_file_leaves_store_untouched() {
    let mut store = MedicineStore::open_in_memory().unwrap();
    let result = csv_import::import_file(&mut store, "/nonexistent/medicines.csv");

    assert!(result.is_err());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn export_then_import_round_trips_records() {
    let source = MedicineStore::open_in_memory().unwrap();
    source
        .insert(&NewMedicine {
            name: "Paracetamol".to_string(),
            batch: Some("B-42".to_string()),
            quantity: 20,
            unit: "box".to_string(),
            expiry_date: Some(date(2026, 3, 1)),
            threshold: 5,
            notes: Some("painkiller".to_string()),
        })
        .unwrap();
    source
        .insert(&NewMedicine {
            name: "Zinc".to_string(),
            ..NewMedicine::default()
        })
        .unwrap();

    let export = NamedTempFile::new().unwrap();
    let meds = source.list_all().unwrap();
    csv_export::export_file(&meds, export.path()).unwrap();

    let mut target = MedicineStore::open_in_memory().unwrap();
    let stats = csv_import::import_file(&mut target, export.path()).unwrap();
    assert_eq!(stats.inserted, 2);

    let copied = target.list_all().unwrap();
    assert_eq!(copied.len(), meds.len());
    for (original, copy) in meds.iter().zip(&copied) {
        assert_eq!(original.name, copy.name);
        assert_eq!(original.batch, copy.batch);
        assert_eq!(original.quantity, copy.quantity);
        assert_eq!(original.unit, copy.unit);
        assert_eq!(original.expiry_date, copy.expiry_date);
        assert_eq!(original.threshold, copy.threshold);
        assert_eq!(original.notes, copy.notes);
    }
}

#[test]
fn file_backed_store_persists_between_opens() {
    let db = NamedTempFile::new().unwrap();

    {
        let store = MedicineStore::open(db.path()).unwrap();
        store
            .insert(&NewMedicine {
                name: "Aspirin".to_string(),
                quantity: 12,
                ..NewMedicine::default()
            })
            .unwrap();
    }

    let store = MedicineStore::open(db.path()).unwrap();
    let meds = store.list_all().unwrap();
    assert_eq!(meds.len(), 1);
    assert_eq!(meds[0].name, "Aspirin");
    assert_eq!(meds[0].quantity, 12);
}

#[test]
fn reimporting_an_export_with_ids_assigns_fresh_ids() {
    let mut store = MedicineStore::open_in_memory().unwrap();
    store
        .insert(&NewMedicine {
            name: "Aspirin".to_string(),
            ..NewMedicine::default()
        })
        .unwrap();

    let export = NamedTempFile::new().unwrap();
    let meds = store.list_all().unwrap();
    csv_export::export_file(&meds, export.path()).unwrap();

    let stats = csv_import::import_file(&mut store, export.path()).unwrap();
    assert_eq!(stats.inserted, 1);

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_ne!(all[0].id, all[1].id);
}
