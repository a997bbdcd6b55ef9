//! Order Packs CLI.
//!
//! Commands:
//! - `calculate` - Run the engine on an ad-hoc catalog (no database)
//! - `order`     - Calculate and store an order against the stored catalog
//! - `orders`    - List recent orders
//! - `show`      - Show one order
//! - `packs`     - Show the stored catalog
//! - `set-packs` - Replace the stored catalog
//! - `status`    - Database health and counts

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use order_packs::logging::init_tracing;
use order_packs::services::{quote, OrderLimits};
use order_packs::{AppConfig, AppResult, AppState, ErrorResponse};
use packs_core::validation::validate_pack_sizes;
use packs_core::{Order, OrderRequest, PackSize, DEFAULT_PACK_SIZES};

#[derive(Parser)]
#[command(
    name = "order-packs",
    about = "Order Packs: ship whole packs, fewest items first",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate packs without touching the database
    Calculate {
        /// Number of items ordered
        #[arg(allow_hyphen_values = true)]
        count: i64,

        /// Comma separated pack sizes (default: 250,500,1000,2000,5000)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        packs: Option<Vec<i64>>,
    },

    #[command(flatten)]
    Stored(StoredCommand),
}

/// Commands that open the database.
#[derive(Subcommand)]
enum StoredCommand {
    /// Calculate and store an order using the stored catalog
    Order {
        /// Number of items ordered
        #[arg(allow_hyphen_values = true)]
        count: i64,
    },

    /// List the most recent orders
    Orders,

    /// Show one order by id
    Show {
        /// Order id (UUID)
        id: String,
    },

    /// Show the stored pack catalog
    Packs,

    /// Replace the stored pack catalog
    SetPacks {
        /// Pack sizes
        #[arg(required = true, value_delimiter = ',', allow_hyphen_values = true)]
        sizes: Vec<i64>,
    },

    /// Show database status
    Status,
}

#[derive(Serialize)]
struct StatusReport {
    healthy: bool,
    migrations_total: usize,
    migrations_applied: usize,
    pack_sizes: i64,
    orders: i64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    match run(cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                match serde_json::to_string_pretty(&ErrorResponse::from(&err)) {
                    Ok(body) => println!("{body}"),
                    Err(_) => eprintln!("error: {err}"),
                }
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, json: bool) -> AppResult<()> {
    let config = AppConfig::load()?;
    debug!(config = ?config, "Configuration loaded");

    match command {
        Commands::Calculate { count, packs } => calculate(count, packs, &config, json),
        Commands::Stored(command) => run_stored(command, config, json).await,
    }
}

fn calculate(count: i64, packs: Option<Vec<i64>>, config: &AppConfig, json: bool) -> AppResult<()> {
    let raw = packs.unwrap_or_else(|| DEFAULT_PACK_SIZES.iter().map(|&s| i64::from(s)).collect());
    let catalog = validate_pack_sizes(&raw, config.max_pack_sizes, config.max_pack_size)?;
    let selection = quote(OrderRequest::new(count), &catalog, OrderLimits::from(config))?;

    if json {
        print_json(&selection);
    } else {
        println!("requested: {}", selection.requested());
        print_pack_lines(
            selection.packs(),
            selection.total_items(),
            selection.overshoot(),
            selection.total_packs(),
        );
    }
    Ok(())
}

async fn run_stored(command: StoredCommand, config: AppConfig, json: bool) -> AppResult<()> {
    let state = AppState::open(config).await?;
    let orders = state.order_service();
    let packs = state.pack_service();

    match command {
        StoredCommand::Order { count } => {
            let order = orders
                .place_order(OrderRequest::new(count), packs.store())
                .await?;
            print_order(&order, json);
        }

        StoredCommand::Orders => {
            let recent = orders.recent_orders().await?;
            if json {
                print_json(&recent);
            } else if recent.is_empty() {
                println!("no orders yet");
            } else {
                for order in &recent {
                    println!(
                        "{}  {}  requested {:>9}  shipped {:>9} (+{})  packs {:>6}  {}",
                        order.created_at.format("%Y-%m-%d %H:%M:%S"),
                        order.id,
                        order.requested_item_count,
                        order.shipped_item_count,
                        order.overshoot(),
                        order.total_packs,
                        order.status,
                    );
                }
            }
        }

        StoredCommand::Show { id } => {
            let order = orders.get_order(&id).await?;
            print_order(&order, json);
        }

        StoredCommand::Packs => {
            let catalog = packs.get_packs().await?;
            print_catalog(&catalog, json);
        }

        StoredCommand::SetPacks { sizes } => {
            let catalog = packs.save_packs(&sizes).await?;
            print_catalog(&catalog, json);
        }

        StoredCommand::Status => {
            let (migrations_total, migrations_applied) = state.db.migration_status().await?;
            let report = StatusReport {
                healthy: state.db.health_check().await,
                migrations_total,
                migrations_applied,
                pack_sizes: state.db.packs().count().await?,
                orders: state.db.orders().count().await?,
            };

            if json {
                print_json(&report);
            } else {
                println!("database:   {}", state.config.db_path.display());
                println!("healthy:    {}", report.healthy);
                println!("migrations: {}/{}", report.migrations_applied, report.migrations_total);
                println!("pack sizes: {}", report.pack_sizes);
                println!("orders:     {}", report.orders);
            }
        }
    }

    state.db.close().await;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(body) => println!("{body}"),
        Err(e) => eprintln!("error: could not encode output: {e}"),
    }
}

fn print_order(order: &Order, json: bool) {
    if json {
        print_json(order);
        return;
    }

    println!("order:     {}", order.id);
    println!("status:    {}", order.status);
    println!("created:   {}", order.created_at.to_rfc3339());
    println!("requested: {}", order.requested_item_count);
    print_pack_lines(
        &order.packs,
        order.shipped_item_count,
        order.overshoot(),
        order.total_packs,
    );
}

fn print_pack_lines(
    packs: &BTreeMap<PackSize, u64>,
    total_items: u64,
    overshoot: u64,
    total_packs: u64,
) {
    println!("shipped:   {total_items} (+{overshoot})");
    println!("packs:     {total_packs}");
    for (size, count) in packs.iter().rev() {
        println!("  {:>8} x {}", size, count);
    }
}

fn print_catalog(catalog: &[PackSize], json: bool) {
    if json {
        print_json(&catalog);
    } else if catalog.is_empty() {
        println!("catalog is empty");
    } else {
        let sizes: Vec<String> = catalog.iter().map(PackSize::to_string).collect();
        println!("{}", sizes.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_calculate_stays_off_the_database_path() {
        let cli = Cli::try_parse_from(["order-packs", "calculate", "12", "--packs", "5,10"]).unwrap();
        match cli.command {
            Commands::Calculate { count, packs } => {
                assert_eq!(count, 12);
                assert_eq!(packs, Some(vec![5, 10]));
            }
            Commands::Stored(_) => panic!("calculate parsed as a stored command"),
        }

        let cli = Cli::try_parse_from(["order-packs", "--json", "set-packs", "23,31,53"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Stored(StoredCommand::SetPacks { ref sizes }) if sizes == &[23, 31, 53]
        ));

        let cli = Cli::try_parse_from(["order-packs", "order", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Stored(StoredCommand::Order { count: -1 })
        ));
    }
}
