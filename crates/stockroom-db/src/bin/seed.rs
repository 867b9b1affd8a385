//! # Seed Data Generator
//!
//! Fills a record store with sample grocery products for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./inventory.txt with every sample product
//! cargo run -p stockroom-db --bin stockroom-seed
//!
//! # Seed a SQLite table instead, capped at 10 products
//! cargo run -p stockroom-db --bin stockroom-seed -- --backend table --data ./shop.db --count 10
//! ```
//!
//! Products already present (by name) are skipped, so seeding twice is safe.

use std::env;

use stockroom_db::{Backend, BackendKind, Inventory};

/// Sample products: (name, base price)
const SAMPLES: &[(&str, i64)] = &[
    ("apple", 3),
    ("banana", 2),
    ("cherry", 9),
    ("milk", 4),
    ("bread", 3),
    ("butter", 6),
    ("eggs", 5),
    ("rice", 7),
    ("pasta", 2),
    ("coffee", 12),
    ("tea", 8),
    ("sugar", 3),
    ("salt", 1),
    ("honey", 10),
    ("oatmeal", 4),
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = SAMPLES.len();
    let mut backend = BackendKind::File;
    let mut data_path = String::from("./inventory.txt");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(SAMPLES.len());
                    i += 1;
                }
            }
            "--backend" | "-b" => {
                if i + 1 < args.len() {
                    backend = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: stockroom-seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>         Number of products to add (default: all samples)");
                println!("  -b, --backend <KIND>    file or table (default: file)");
                println!("  -d, --data <PATH>       Store path (default: ./inventory.txt)");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Backend: {}", backend);
    println!("Store:   {}", data_path);
    println!();

    let inventory = Inventory::new(Backend::open(backend, &data_path).await?);

    let mut added = 0;
    let mut skipped = 0;
    for (index, (name, price)) in SAMPLES.iter().take(count).enumerate() {
        let quantity = generate_quantity(index);
        match inventory.add(name, quantity, *price).await {
            Ok(product) => {
                added += 1;
                println!("  + {:<10} x{:<3} ${}", product.name, product.quantity, product.unit_price);
            }
            Err(e) if e.is_already_exists() => skipped += 1,
            Err(e) => {
                eprintln!("Failed to add {}: {}", name, e);
            }
        }
    }

    let summary = inventory.summary().await?;
    inventory.store().close().await;

    println!();
    println!("Added {} products, skipped {} existing", added, skipped);
    println!(
        "Store now holds {} products, {} units, ${} capital",
        summary.product_count, summary.total_quantity, summary.total_capital
    );

    Ok(())
}

/// Deterministic quantity between 1 and 24.
fn generate_quantity(seed: usize) -> i64 {
    ((seed * 7) % 24 + 1) as i64
}
