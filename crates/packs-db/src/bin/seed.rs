//! # Seed Data Generator
//!
//! Populates the database with sample orders for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 orders (default)
//! cargo run -p packs-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p packs-db --bin seed -- --orders 500
//!
//! # Restore the default catalog first, then seed
//! cargo run -p packs-db --bin seed -- --db ./data/app.db --reset-packs
//! ```
//!
//! Item counts cycle through small, boundary and large values so the
//! history shows exact fits, small overshoots and multi-pack orders.

use chrono::Utc;
use clap::Parser;
use packs_core::{calculate_packs, Order, PackSize, DEFAULT_PACK_SIZES};
use packs_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Item counts the generator cycles through.
const SAMPLE_COUNTS: &[i64] = &[1, 249, 250, 251, 499, 501, 999, 1001, 4999, 12001, 25_350];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Order Packs seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./data/app.db")]
    db: String,

    /// Number of orders to generate
    #[arg(short, long, default_value_t = 50)]
    orders: usize,

    /// Replace the catalog with the default pack sizes before seeding
    #[arg(long)]
    reset_packs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    info!(db = %args.db, orders = args.orders, "Seeding database");

    let db = Database::new(DbConfig::new(&args.db)).await?;

    if args.reset_packs {
        let defaults: Vec<PackSize> = DEFAULT_PACK_SIZES
            .iter()
            .filter_map(|&size| PackSize::new(size))
            .collect();
        db.packs().replace_all(&defaults).await?;
        info!(sizes = ?DEFAULT_PACK_SIZES, "Pack catalog reset");
    }

    let catalog = db.packs().list().await?;
    if catalog.is_empty() {
        warn!("Pack catalog is empty, nothing to seed (use --reset-packs)");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0usize;

    for &item_count in SAMPLE_COUNTS.iter().cycle().take(args.orders) {
        let selection = match calculate_packs(&catalog, item_count) {
            Ok(selection) => selection,
            Err(e) => {
                warn!(item_count, error = %e, "Skipping sample order");
                continue;
            }
        };

        let order = Order::from_selection(Uuid::new_v4().to_string(), selection, Utc::now());
        db.orders().insert(&order).await?;
        generated += 1;
    }

    let total = db.orders().count().await?;
    info!(
        generated,
        total,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}
