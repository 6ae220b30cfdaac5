//! # Seed Data Generator
//!
//! Populates the database with cashiers and products for development.
//!
//! ## Usage
//! ```bash
//! # 3 cashiers + 50 products (default)
//! cargo run -p tally-db --bin seed
//!
//! # Custom amount
//! cargo run -p tally-db --bin seed -- --products 500
//!
//! # Specify database path
//! cargo run -p tally-db --bin seed -- --db ./data/tally.db
//! ```
//!
//! Product codes are sequential: `PRD-0001`, `PRD-0002`, ...
//! Prices are whole currency units between 1,000 and 49,500.

use std::env;
use tally_core::{Money, NewCashier, NewProduct};
use tally_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PRODUCTS: usize = 50;

const CASHIERS: &[&str] = &["Ana", "Budi", "Citra"];

const PRODUCT_NAMES: &[&str] = &[
    "Kopi Susu",
    "Teh Manis",
    "Air Mineral",
    "Roti Bakar",
    "Nasi Goreng",
    "Mie Ayam",
    "Pisang Goreng",
    "Es Jeruk",
    "Keripik Singkong",
    "Coklat Panas",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_PRODUCTS;
    let mut db_path = String::from("./tally.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_PRODUCTS);
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
                println!("Tally POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>  Number of products to generate (default: {DEFAULT_PRODUCTS})");
                println!("  -d, --db <PATH>     Database file path (default: ./tally.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(db = %db_path, products = count, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.products().list().await?.len();
    if existing > 0 {
        warn!(
            existing,
            "Database already has products, skipping seed (delete the file to regenerate)"
        );
        db.close().await;
        return Ok(());
    }

    for name in CASHIERS {
        let cashier = db.cashiers().create(&NewCashier { name: name.to_string() }).await?;
        info!(id = cashier.id, name = %cashier.name, "Created cashier");
    }

    let start = std::time::Instant::now();
    for index in 0..count {
        let product = generate_product(index);
        if let Err(e) = db.products().create(&product).await {
            warn!(code = %product.code, error = %e, "Failed to insert product");
            continue;
        }

        if (index + 1) % 100 == 0 {
            info!(generated = index + 1, "Progress");
        }
    }

    info!(
        products = count,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Builds the product at position `index` (zero-based).
fn generate_product(index: usize) -> NewProduct {
    let base = PRODUCT_NAMES[index % PRODUCT_NAMES.len()];
    let batch = index / PRODUCT_NAMES.len();

    let name = if batch == 0 {
        base.to_string()
    } else {
        format!("{} #{}", base, batch + 1)
    };

    // 1,000 - 49,500 in steps of 500
    let unit_price = 1_000 + ((index * 37) % 98) as i64 * 500;

    NewProduct {
        name,
        unit_price: Money::new(unit_price),
        code: format!("PRD-{:04}", index + 1),
    }
}
