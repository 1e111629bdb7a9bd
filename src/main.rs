//! Command line interface for the medicine inventory tracker.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use med_inventory::{
    alerts, csv_export, csv_import, Medicine, MedicineStore, NewMedicine, Result,
    DEFAULT_THRESHOLD, DEFAULT_UNIT,
};

#[derive(Parser)]
#[command(name = "med_inventory", version, about = "Track medicine stock, expiry dates and low-stock alerts")]
struct Cli {
    /// Path to the SQLite database (defaults to the per-user data directory)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all medicines, optionally filtered by a name fragment
    List {
        /// Show only medicines whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a new medicine
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        batch: Option<String>,
        #[arg(long, default_value_t = 0)]
        quantity: i64,
        #[arg(long, default_value = DEFAULT_UNIT)]
        unit: String,
        /// Expiry date as YYYY-MM-DD
        #[arg(long)]
        expiry: Option<NaiveDate>,
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit fields of an existing medicine
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        batch: Option<String>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        unit: Option<String>,
        /// New expiry date as YYYY-MM-DD
        #[arg(long, conflicts_with = "no_expiry")]
        expiry: Option<NaiveDate>,
        /// Clear the expiry date
        #[arg(long)]
        no_expiry: bool,
        #[arg(long)]
        threshold: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a medicine by id
    Delete { id: i64 },
    /// Show expired, near-expiry and low-stock medicines
    Alerts {
        /// Near-expiry lookahead in days
        #[arg(long, default_value_t = alerts::DEFAULT_EXPIRY_WINDOW_DAYS)]
        window: i64,
    },
    /// Import medicines from a CSV file
    Import { file: PathBuf },
    /// Export all medicines to a CSV file
    Export {
        #[arg(default_value = csv_export::EXPORT_FILE_NAME)]
        file: PathBuf,
    },
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("med_inventory").join("inventory.db"))
        .unwrap_or_else(|| PathBuf::from("inventory.db"))
}

fn open_store(database: Option<PathBuf>) -> Result<MedicineStore> {
    let path = database.unwrap_or_else(default_db_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    MedicineStore::open(path)
}

fn print_table(meds: &[Medicine]) {
    if meds.is_empty() {
        println!("No medicines found.");
        return;
    }
    println!(
        "{:>4}  {:<24} {:<10} {:>8}  {:<6} {:<10} {:>9}  {}",
        "id", "name", "batch", "quantity", "unit", "expiry", "threshold", "notes"
    );
    for med in meds {
        println!(
            "{:>4}  {:<24} {:<10} {:>8}  {:<6} {:<10} {:>9}  {}",
            med.id,
            med.name,
            med.batch.as_deref().unwrap_or("-"),
            med.quantity,
            med.unit,
            med.expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            med.threshold,
            med.notes.as_deref().unwrap_or(""),
        );
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut store = open_store(cli.database)?;

    match cli.command {
        Command::List { search } => {
            let meds = match search {
                Some(fragment) => store.search(&fragment)?,
                None => store.list_all()?,
            };
            print_table(&meds);
        }
        Command::Add {
            name,
            batch,
            quantity,
            unit,
            expiry,
            threshold,
            notes,
        } => {
            let new = NewMedicine {
                name,
                batch,
                quantity,
                unit,
                expiry_date: expiry,
                threshold,
                notes,
            };
            new.validate()?;
            let id = store.insert(&new)?;
            info!("Added medicine '{}' with id {id}", new.name);
            println!("Added '{}' (id {id})", new.name);
        }
        Command::Edit {
            id,
            name,
            batch,
            quantity,
            unit,
            expiry,
            no_expiry,
            threshold,
            notes,
        } => {
            let mut med = store.get(id)?;
            if let Some(name) = name {
                med.name = name;
            }
            if let Some(batch) = batch {
                med.batch = Some(batch);
            }
            if let Some(quantity) = quantity {
                med.quantity = quantity;
            }
            if let Some(unit) = unit {
                med.unit = unit;
            }
            if let Some(expiry) = expiry {
                med.expiry_date = Some(expiry);
            }
            if no_expiry {
                med.expiry_date = None;
            }
            if let Some(threshold) = threshold {
                med.threshold = threshold;
            }
            if let Some(notes) = notes {
                med.notes = Some(notes);
            }
            med.validate()?;
            store.update(&med)?;
            println!("Updated '{}' (id {id})", med.name);
        }
        Command::Delete { id } => {
            store.delete(id)?;
            println!("Deleted medicine {id}");
        }
        Command::Alerts { window } => {
            let meds = store.list_all()?;
            let report = alerts::check_expired_and_near_expiry(&meds, window);
            let low = alerts::check_low_stock(&meds);

            println!("Expired ({}):", report.expired.len());
            for med in &report.expired {
                let expiry = med
                    .expiry_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!("  [{}] {} (expired {expiry})", med.id, med.name);
            }

            println!("Near expiry within {window} days ({}):", report.near_expiry.len());
            for near in &report.near_expiry {
                println!(
                    "  [{}] {} ({} days left)",
                    near.medicine.id, near.medicine.name, near.days_left
                );
            }

            println!("Low stock ({}):", low.len());
            for med in &low {
                println!(
                    "  [{}] {} ({} {} <= threshold {})",
                    med.id, med.name, med.quantity, med.unit, med.threshold
                );
            }
        }
        Command::Import { file } => {
            let stats = csv_import::import_file(&mut store, &file)?;
            println!(
                "Imported {} medicines from {} ({} rows skipped)",
                stats.inserted,
                file.display(),
                stats.skipped
            );
        }
        Command::Export { file } => {
            let meds = store.list_all()?;
            csv_export::export_file(&meds, &file)?;
            println!("Exported {} medicines to {}", meds.len(), file.display());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
