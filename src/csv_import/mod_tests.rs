//! Unit tests for the CSV importer.

use super::*;
use chrono::NaiveDate;

fn memory_store() -> MedicineStore {
    MedicineStore::open_in_memory().unwrap()
}

fn import(csv: &str) -> (MedicineStore, Result<ImportStats>) {
    let mut store = memory_store();
    let result = import_reader(&mut store, csv.as_bytes());
    (store, result)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod happy_path_tests {
    use super::*;

    #[test]
    fn imports_full_rows() {
        let csv = "\
name,batch,quantity,unit,expiry_date,threshold,notes
Paracetamol,B-42,20,box,2026-03-01,5,painkiller
Ibuprofen,,50,pcs,2027-01-15,10,
";
        let (store, result) = import(csv);
        let stats = result.unwrap();
        assert_eq!(stats, ImportStats { inserted: 2, skipped: 0 });

        let meds = store.list_all().unwrap();
        assert_eq!(meds.len(), 2);

        let para = &meds[1];
        assert_eq!(para.name, "Paracetamol");
        assert_eq!(para.batch.as_deref(), Some("B-42"));
        assert_eq!(para.quantity, 20);
        assert_eq!(para.unit, "box");
        assert_eq!(para.expiry_date, Some(date(2026, 3, 1)));
        assert_eq!(para.threshold, 5);
        assert_eq!(para.notes.as_deref(), Some("painkiller"));

        let ibu = &meds[0];
        assert_eq!(ibu.name, "Ibuprofen");
        assert_eq!(ibu.batch, None);
        assert_eq!(ibu.notes, None);
    }

    #[test]
    fn ignores_exported_id_column() {
        let csv = "\
id,name,batch,quantity,unit,expiry_date,threshold,notes
7,Aspirin,,10,pcs,,5,
";
        let (store, result) = import(csv);
        assert_eq!(result.unwrap().inserted, 1);

        let meds = store.list_all().unwrap();
        assert_eq!(meds[0].name, "Aspirin");
        assert_eq!(meds[0].id, 1, "store assigns its own ids");
    }

    #[test]
    fn empty_file_with_header_imports_nothing() {
        let csv = "name,batch,quantity,unit,expiry_date,threshold,notes\n";
        let (store, result) = import(csv);
        assert_eq!(result.unwrap(), ImportStats { inserted: 0, skipped: 0 });
        assert!(store.list_all().unwrap().is_empty());
    }
}

mod field_default_tests {
    use super::*;

    #[test]
    fn minimal_columns_use_defaults() {
        let csv = "name\nParacetamol\n";
        let (store, result) = import(csv);
        assert_eq!(result.unwrap().inserted, 1);

        let med = &store.list_all().unwrap()[0];
        assert_eq!(med.quantity, 0);
        assert_eq!(med.unit, "pcs");
        assert_eq!(med.expiry_date, None);
        assert_eq!(med.threshold, 5);
        assert_eq!(med.batch, None);
        assert_eq!(med.notes, None);
    }

    #[test]
    fn defective_cells_degrade_per_field() {
        let csv = "\
name,quantity,unit,expiry_date,threshold
Aspirin,lots,,soon,many
";
        let (store, result) = import(csv);
        assert_eq!(result.unwrap().inserted, 1);

        let med = &store.list_all().unwrap()[0];
        assert_eq!(med.quantity, 0);
        assert_eq!(med.unit, "pcs");
        assert_eq!(med.expiry_date, None);
        assert_eq!(med.threshold, 5);
    }

    #[test]
    fn rows_without_name_are_skipped_not_failed() {
        let csv = "\
name,quantity
,10
   ,20
Aspirin,30
";
        let (store, result) = import(csv);
        assert_eq!(result.unwrap(), ImportStats { inserted: 1, skipped: 2 });
        assert_eq!(store.list_all().unwrap()[0].name, "Aspirin");
    }

    #[test]
    fn alternate_date_formats_are_accepted() {
        let csv = "\
name,expiry_date
Dotted,01.03.2026
Slashed,2026/03/01
";
        let (store, result) = import(csv);
        assert_eq!(result.unwrap().inserted, 2);

        let meds = store.list_all().unwrap();
        for med in &meds {
            assert_eq!(med.expiry_date, Some(date(2026, 3, 1)), "{}", med.name);
        }
    }
}

mod batch_failure_tests {
    use super::*;

    #[test]
    fn unreadable_input_inserts_nothing() {
        let bytes: &[u8] = b"name,quantity\nAspirin,10\n\xff\xfe\x00garbage\xff,5\n";
        let mut store = memory_store();
        let result = import_reader(&mut store, bytes);

        assert!(result.is_err());
        assert!(store.list_all().unwrap().is_empty(), "no partial import");
    }

    #[test]
    fn valid_rows_before_the_defect_are_rolled_back() {
        let bytes: &[u8] = b"name,quantity\nGood1,1\nGood2,2\n\xc3\x28bad,3\n";
        let mut store = memory_store();
        let result = import_reader(&mut store, bytes);

        assert!(result.is_err());
        assert!(store.list_all().unwrap().is_empty());
    }
}
