//! # Seed Data Generator
//!
//! Populates the database with development data: a shelf of medicines,
//! a few suppliers, and a few members.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p apotek-db --bin seed
//!
//! # Specify database path
//! cargo run -p apotek-db --bin seed -- --db ./data/db_apotek.db
//! ```

use std::env;

use apotek_core::{Money, NewMedicine, NewMember, NewSupplier};
use apotek_db::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (name, category, unit, stock, price in rupiah)
const MEDICINES: &[(&str, &str, &str, i64, i64)] = &[
    ("Paracetamol 500mg", "Analgesik", "Strip", 120, 8_000),
    ("Ibuprofen 400mg", "Analgesik", "Strip", 80, 12_000),
    ("Asam Mefenamat 500mg", "Analgesik", "Strip", 60, 9_500),
    ("Amoxicillin 500mg", "Antibiotik", "Strip", 90, 15_000),
    ("Cefadroxil 500mg", "Antibiotik", "Strip", 45, 22_000),
    ("Ciprofloxacin 500mg", "Antibiotik", "Strip", 30, 18_500),
    ("CTM 4mg", "Antihistamin", "Strip", 150, 3_500),
    ("Loratadine 10mg", "Antihistamin", "Strip", 70, 11_000),
    ("Cetirizine 10mg", "Antihistamin", "Strip", 85, 9_000),
    ("Antasida DOEN", "Pencernaan", "Botol", 40, 14_000),
    ("Omeprazole 20mg", "Pencernaan", "Strip", 55, 16_500),
    ("Loperamide 2mg", "Pencernaan", "Strip", 65, 7_500),
    ("Oralit", "Pencernaan", "Sachet", 200, 2_000),
    ("OBH Combi Batuk", "Batuk & Flu", "Botol", 35, 18_000),
    ("Dextromethorphan Sirup", "Batuk & Flu", "Botol", 25, 21_000),
    ("Vitamin C 500mg", "Vitamin", "Strip", 180, 6_000),
    ("Vitamin B Kompleks", "Vitamin", "Strip", 140, 7_000),
    ("Multivitamin Anak", "Vitamin", "Botol", 48, 32_000),
    ("Betadine 30ml", "Antiseptik", "Botol", 42, 17_500),
    ("Alkohol 70% 100ml", "Antiseptik", "Botol", 38, 10_000),
    ("Salbutamol 2mg", "Pernapasan", "Strip", 20, 13_500),
    ("Amlodipine 5mg", "Kardiovaskular", "Strip", 25, 19_000),
    ("Metformin 500mg", "Diabetes", "Strip", 33, 12_500),
    ("Kasa Steril", "Alat Kesehatan", "Box", 60, 15_000),
    ("Plester Luka", "Alat Kesehatan", "Box", 110, 8_500),
];

const SUPPLIERS: &[(&str, &str, &str, &str)] = &[
    (
        "PT Kimia Farma",
        "Jl. Veteran No. 9, Jakarta",
        "021-3847709",
        "sales@kimiafarma.example",
    ),
    (
        "PT Kalbe Farma",
        "Jl. Let. Jend. Suprapto Kav. 4, Jakarta",
        "021-42873888",
        "order@kalbe.example",
    ),
    (
        "PT Dexa Medica",
        "Jl. Bambang Utoyo No. 138, Palembang",
        "0711-711181",
        "sales@dexa.example",
    ),
];

const MEMBERS: &[(&str, &str, &str, &str)] = &[
    (
        "Budi Santoso",
        "Jl. Merdeka No. 1",
        "0812-0000-0001",
        "budi@example.com",
    ),
    (
        "Siti Aminah",
        "Jl. Sudirman No. 22",
        "0812-0000-0002",
        "siti@example.com",
    ),
    (
        "Andi Wijaya",
        "Jl. Gajah Mada No. 7",
        "0812-0000-0003",
        "andi@example.com",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./db_apotek.db");

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
                println!("Apotek POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./db_apotek.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Apotek POS Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database (migrations run on connect)
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing medicines
    let existing = db.medicines().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} medicines", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding...");

    for (name, category, unit, stock, price) in MEDICINES {
        db.medicines()
            .insert(&NewMedicine {
                name: (*name).to_string(),
                category: (*category).to_string(),
                unit: (*unit).to_string(),
                stock: *stock,
                price: Money::from_rupiah(*price),
                status: Some("Tersedia".to_string()),
            })
            .await?;
        info!(name = %name, "Seeded medicine");
    }

    for (name, address, phone, email) in SUPPLIERS {
        db.suppliers()
            .insert(&NewSupplier {
                name: (*name).to_string(),
                address: (*address).to_string(),
                phone: (*phone).to_string(),
                email: (*email).to_string(),
            })
            .await?;
        info!(name = %name, "Seeded supplier");
    }

    for (name, address, phone, email) in MEMBERS {
        db.members()
            .insert(&NewMember {
                name: (*name).to_string(),
                address: (*address).to_string(),
                phone: (*phone).to_string(),
                email: (*email).to_string(),
            })
            .await?;
        info!(name = %name, "Seeded member");
    }

    println!(
        "✓ Seeded {} medicines, {} suppliers, {} members",
        MEDICINES.len(),
        SUPPLIERS.len(),
        MEMBERS.len()
    );
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
