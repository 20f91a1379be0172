//! # Seed Data Generator
//!
//! Populates a store with sample wines for development.
//!
//! ## Usage
//! ```bash
//! # Generate 24 wines (default)
//! cargo run -p vinicola-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p vinicola-db --bin seed -- --count 100
//!
//! # Specify database path
//! cargo run -p vinicola-db --bin seed -- --db ./data/vinicola_db.sqlite
//! ```
//!
//! Each wine gets a grape/vintage name, a strength label and a price between
//! 29.90 and 189.90. Counts above the 48 grape/vintage pairs repeat them
//! with a lot suffix. An existing catalog is left alone.

use std::env;
use vinicola_core::NewProduct;
use vinicola_db::{Database, DbConfig};

/// Grapes and their usual strength label.
const GRAPES: &[(&str, &str)] = &[
    ("Malbec", "13.5%"),
    ("Cabernet Sauvignon", "14%"),
    ("Merlot", "13%"),
    ("Tannat", "14.5%"),
    ("Pinot Noir", "12.5%"),
    ("Syrah", "14%"),
    ("Chardonnay", "13%"),
    ("Sauvignon Blanc", "12%"),
    ("Moscato", "7.5%"),
    ("Touriga Nacional", "13.5%"),
    ("Carmenere", "13.5%"),
    ("Riesling", "11%"),
];

const VINTAGES: &[u16] = &[2019, 2020, 2021, 2022];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 24;
    let mut db_path = String::from("./vinicola_dev.sqlite");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(24);
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
                println!("Vinicola Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of wines to generate (default: 24)");
                println!("  -d, --db <PATH>    Database file path (default: ./vinicola_dev.sqlite)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Vinicola Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Wines:    {}", count);
    println!();

    let db = Database::open(DbConfig::new(&db_path)).await?;
    println!("✓ Store opened (schema v{})", db.schema_version().await?);

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} wines", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for index in 0..count {
        let wine = sample_wine(index);

        if let Err(e) = db.products().insert(&wine).await {
            eprintln!("Failed to insert {}: {}", wine.name, e);
            continue;
        }

        generated += 1;
    }

    println!("✓ Generated {} wines in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Builds the `index`-th sample wine.
///
/// Walks every grape for one vintage, then the next vintage. Once all
/// grape/vintage pairs are used, names get a lot suffix (`"Malbec 2019 #2"`).
fn sample_wine(index: usize) -> NewProduct {
    let (grape, strength) = GRAPES[index % GRAPES.len()];
    let vintage = VINTAGES[(index / GRAPES.len()) % VINTAGES.len()];
    let lot = index / (GRAPES.len() * VINTAGES.len());

    let name = if lot == 0 {
        format!("{} {}", grape, vintage)
    } else {
        format!("{} {} #{}", grape, vintage, lot + 1)
    };

    NewProduct::new(name, strength, sample_price(index))
}

/// Deterministic price spread between 29.90 and 189.90.
fn sample_price(seed: usize) -> f64 {
    let steps = (seed * 37) % 17;
    29.90 + steps as f64 * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_wines_cover_requested_count_with_unique_names() {
        let names: HashSet<String> = (0..100).map(|i| sample_wine(i).name).collect();
        assert_eq!(names.len(), 100);
    }

    #[test]
    fn test_sample_wine_names() {
        assert_eq!(sample_wine(0).name, "Malbec 2019");
        assert_eq!(sample_wine(GRAPES.len()).name, "Malbec 2020");

        let first_repeat = sample_wine(GRAPES.len() * VINTAGES.len());
        assert_eq!(first_repeat.name, "Malbec 2019 #2");
        assert_eq!(first_repeat.alcohol_content, "13.5%");
    }

    #[test]
    fn test_sample_price_range() {
        for i in 0..200 {
            let price = sample_wine(i).price;
            assert!((29.0..=190.0).contains(&price));
        }
    }
}
