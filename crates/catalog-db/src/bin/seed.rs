//! # Seed Data Generator
//!
//! Populates a development database with catalog products.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default) into $DATABASE_URL
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 2000
//!
//! # Specify database
//! cargo run -p catalog-db --bin seed -- --url postgres://localhost/catalog_dev
//! ```
//!
//! ## Generated Products
//! Every category gets a list of base names crossed with variants:
//! - Name: `{base} {variant}`, then `{base} {variant} #2`, `#3`, ... once
//!   every combination has been used
//! - Price: 4.99 - 104.98
//! - Inventory: 0 - 40 (roughly one in five out of stock)

use std::env;

use catalog_core::Category;
use catalog_db::{Database, DbConfig};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Base product names per category.
const CATALOG: &[(Category, &[&str])] = &[
    (
        Category::Electronics,
        &[
            "Wireless Headphones",
            "Bluetooth Speaker",
            "USB-C Charger",
            "Mechanical Keyboard",
            "Gaming Mouse",
            "4K Monitor",
            "Webcam",
            "Smart Watch",
        ],
    ),
    (
        Category::Clothing,
        &[
            "Cotton T-Shirt",
            "Denim Jacket",
            "Wool Sweater",
            "Running Shoes",
            "Rain Coat",
            "Baseball Cap",
        ],
    ),
    (
        Category::Home,
        &[
            "Desk Lamp",
            "Electric Kettle",
            "Throw Blanket",
            "Ceramic Mug",
            "Cast Iron Skillet",
            "Bath Towel",
        ],
    ),
    (
        Category::Books,
        &[
            "Rust Programming Guide",
            "Mystery Novel",
            "Cookbook",
            "World Atlas",
            "Poetry Collection",
        ],
    ),
    (
        Category::Toys,
        &[
            "Building Blocks",
            "Puzzle Set",
            "Plush Bear",
            "Remote Control Car",
            "Board Game",
        ],
    ),
    (
        Category::Misc,
        &["Gift Card", "Notebook", "Umbrella", "Water Bottle"],
    ),
];

/// Variant suffixes with a price addon in cents.
const VARIANTS: &[(&str, i64)] = &[
    ("Standard", 0),
    ("Deluxe", 1500),
    ("Mini", -200),
    ("Pro", 4000),
    ("Limited Edition", 6000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut url: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--url" | "-u" => {
                if i + 1 < args.len() {
                    url = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 500)");
                println!("  -u, --url <URL>    Database URL (default: $DATABASE_URL)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match url {
        Some(url) => DbConfig::new(url),
        None => DbConfig::from_env()?,
    };

    println!("🌱 Catalog Seed Data Generator");
    println!("==============================");
    println!("Products: {}", count);
    println!();

    let db = Database::connect(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count_active().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    let per_round = templates().count();

    for (n, (category, name, variant, price_addon)) in
        templates().cycle().take(count).enumerate()
    {
        let full_name = seeded_name(n, per_round, name, variant);

        if let Err(e) = insert_product(&db, &full_name, category, n, price_addon).await {
            eprintln!("Failed to insert {}: {}", full_name, e);
            continue;
        }

        generated += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    println!();
    println!("Verifying fuzzy search...");
    let hits = db.products().search("headphone").await?;
    println!("  Search 'headphone': {} results", hits.len());
    let hits = db.products().search("Electronics").await?;
    println!("  Search 'Electronics': {} results", hits.len());

    let page = db.products().list(10, 0, "price", "in_stock", "asc").await?;
    println!("  In stock: {} products", page.total);

    info!(generated, "Seed complete");
    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Every (category, base name, variant, price addon) combination, in table order.
fn templates() -> impl Iterator<Item = (Category, &'static str, &'static str, i64)> + Clone {
    CATALOG.iter().flat_map(|(category, names)| {
        names.iter().flat_map(move |name| {
            VARIANTS
                .iter()
                .map(move |(variant, addon)| (*category, *name, *variant, *addon))
        })
    })
}

/// Name for the `n`th generated product. Repeats past the first round get a
/// `#round` suffix so names stay unique.
fn seeded_name(n: usize, per_round: usize, name: &str, variant: &str) -> String {
    let round = n / per_round;
    if round == 0 {
        format!("{} {}", name, variant)
    } else {
        format!("{} {} #{}", name, variant, round + 1)
    }
}

/// Inserts one generated product directly through the write pool.
async fn insert_product(
    db: &Database,
    name: &str,
    category: Category,
    seed: usize,
    price_addon: i64,
) -> Result<(), sqlx::Error> {
    // 4.99 - 44.98 base, plus variant addon, never below 0.99
    let cents = (499 + ((seed * 17) % 4000) as i64 + price_addon).max(99);
    let price = Decimal::new(cents, 2);

    // One in five out of stock
    let inventory = if seed % 5 == 0 { 0 } else { (seed % 40) as i32 + 1 };

    let description = format!(
        "{} from our {} range.",
        name,
        category.display_name().to_lowercase()
    );

    sqlx::query(
        r#"
        INSERT INTO products (name, description, category, price, inventory)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(category)
    .bind(price)
    .bind(inventory)
    .execute(db.write_pool())
    .await?;

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: info, with catalog crates at debug
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_count_is_fully_generated() {
        let per_round = templates().count();
        assert!(per_round < 500);

        let names: HashSet<String> = templates()
            .cycle()
            .take(500)
            .enumerate()
            .map(|(n, (_, name, variant, _))| seeded_name(n, per_round, name, variant))
            .collect();
        assert_eq!(names.len(), 500);
        assert!(names.contains("Gift Card Standard"));
        assert!(names.contains("Gift Card Standard #2"));
    }
}
