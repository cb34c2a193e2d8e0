//! # Seed Data Loader
//!
//! Loads the starter restaurant catalog into a SQLite database.
//!
//! ## Usage
//! ```bash
//! # Seed ./mostrador_dev.db (default)
//! cargo run -p mostrador-db --bin seed
//!
//! # Specify database path
//! cargo run -p mostrador-db --bin seed -- --db ./data/mostrador.db
//! ```
//!
//! Running it twice is harmless: an existing catalog is left alone.

use std::env;

use mostrador_db::{seed_demo_data, Database, DbConfig, PosServices, ProcessorPolicy, SqliteStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mostrador_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mostrador POS Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mostrador_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("🌱 Mostrador POS Seed Data Loader");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let services = PosServices::new(Arc::new(SqliteStore::new(db)), ProcessorPolicy::default());
    let report = seed_demo_data(&services).await?;

    if report.skipped {
        println!("⚠ Database already has products");
        println!("  Skipping seed to avoid overwriting the catalog.");
        println!("  Delete the database file to start over.");
        return Ok(());
    }

    println!();
    println!("✓ {} categories", report.categories);
    println!("✓ {} products", report.products);
    println!("✓ {} clients", report.clients);
    println!("✓ {} suppliers", report.suppliers);
    if report.register_opened {
        println!("✓ Cash register opened");
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
