//! # Seed Data Generator
//!
//! Populates the database with a bootstrap admin account and sample
//! products for development.
//!
//! `/register` only ever creates `client` users, so the first admin has to
//! come from somewhere out of band - this is that somewhere.
//!
//! ## Usage
//! ```bash
//! # Defaults: ./storefront.db, admin@example.com
//! cargo run -p storefront-api --bin seed
//!
//! # Custom database path and admin credentials
//! cargo run -p storefront-api --bin seed -- \
//!     --db ./data/store.db --email admin@shop.test --password s3cret
//! ```

use std::env;

use storefront_api::auth::hash_password;
use storefront_core::{ProductDraft, Role};
use storefront_db::{Database, DbConfig};

/// Sample catalog entries: (name, description, price).
const SAMPLE_PRODUCTS: &[(&str, &str, f64)] = &[
    ("Espresso Beans 1kg", "Dark roast arabica, whole bean", 18.5),
    ("Pour-Over Kettle", "Gooseneck kettle, 1L, stainless", 34.0),
    ("Ceramic Mug", "350ml, dishwasher safe", 9.99),
    ("Paper Filters x100", "Size 02, unbleached", 4.25),
    ("Hand Grinder", "Conical burr, 18 click settings", 42.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./storefront.db");
    let mut admin_email = String::from("admin@example.com");
    let mut admin_password = String::from("change-me");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--email" | "-e" => {
                if i + 1 < args.len() {
                    admin_email = args[i + 1].clone();
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    admin_password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./storefront.db)");
                println!("  -e, --email <EMAIL>    Admin email (default: admin@example.com)");
                println!("  -p, --password <PW>    Admin password (default: change-me)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    // Bootstrap admin
    if db.users().count().await? > 0 {
        println!("⚠ Users already exist, skipping admin bootstrap");
    } else {
        let hash = hash_password(&admin_password)?;
        let admin = db
            .users()
            .insert("admin", &admin_email, &hash, Role::Admin)
            .await?;
        println!("✓ Admin user created: {} (id {})", admin.email, admin.id);
    }

    // Sample catalog
    if db.products().count().await? > 0 {
        println!("⚠ Products already exist, skipping sample catalog");
    } else {
        for (name, description, price) in SAMPLE_PRODUCTS {
            db.products()
                .insert(&ProductDraft {
                    name: name.to_string(),
                    description: description.to_string(),
                    price: *price,
                })
                .await?;
        }
        println!("✓ Inserted {} sample products", SAMPLE_PRODUCTS.len());
    }

    println!();
    println!("✓ Seed complete!");
    Ok(())
}
