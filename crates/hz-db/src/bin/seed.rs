//! # Seed Data Generator
//!
//! Populates the database with a demo catalog and ledger for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./empresa_3d.db with the demo catalog and 20 movements
//! cargo run -p hz-db --bin seed
//!
//! # More ledger rows (useful to see the movement report paginate)
//! cargo run -p hz-db --bin seed -- --movements 200
//!
//! # Specify database path
//! cargo run -p hz-db --bin seed -- --db ./data/empresa_3d.db
//! ```
//!
//! ## Generated Data
//! - One product per catalog entry below, with a starting stock
//! - Alternating purchases and sales spread over the catalog; sales that
//!   would exceed the stock are skipped, exactly as the shop would refuse them

use std::env;

use hz_core::Money;
use hz_db::{Database, DbConfig, SaleAttempt};

/// Demo catalog: (name, starting stock, price in cents)
const CATALOG: &[(&str, i64, i64)] = &[
    ("Llavero personalizado", 40, 1500),
    ("Soporte para celular", 25, 4500),
    ("Maceta geométrica", 18, 6500),
    ("Figura articulada dragón", 6, 12000),
    ("Organizador de escritorio", 12, 8500),
    ("Engranaje de repuesto", 60, 900),
    ("Lámpara luna", 4, 22500),
    ("Porta audífonos", 15, 7000),
    ("Filamento PLA 1kg", 10, 17500),
    ("Filamento PETG 1kg", 8, 19500),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut movements: usize = 20;
    let mut db_path = String::from("./empresa_3d.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--movements" | "-m" => {
                if i + 1 < args.len() {
                    movements = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("HZ Stock Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -m, --movements <N>  Purchases + sales to record (default: 20)");
                println!("  -d, --db <PATH>      Database file path (default: ./empresa_3d.db)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("HZ Stock Seed Data Generator");
    println!("============================");
    println!("Database:  {}", db_path);
    println!("Movements: {}", movements);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid merging into real stock.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut ids = Vec::with_capacity(CATALOG.len());
    for (name, stock, price_cents) in CATALOG {
        let product = db
            .products()
            .add_or_merge(name, *stock, Money::from_cents(*price_cents))
            .await?;
        ids.push(product.id);
    }
    println!("✓ Created {} products", ids.len());

    let (mut purchases, mut sales, mut refused) = (0, 0, 0);
    for n in 0..movements {
        let product_id = ids[(n * 7) % ids.len()];
        let quantity = (n % 5) as i64 + 1;

        if n % 2 == 0 {
            db.purchases().record(product_id, quantity).await?;
            purchases += 1;
            continue;
        }

        match db.sales().begin_sale(product_id, quantity).await? {
            SaleAttempt::Ready(pending) => {
                pending.commit().await?;
                sales += 1;
            }
            SaleAttempt::InsufficientStock { .. } => refused += 1,
        }
    }

    println!("✓ Recorded {} purchases and {} sales", purchases, sales);
    if refused > 0 {
        println!("  {} sales refused for lack of stock", refused);
    }
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
