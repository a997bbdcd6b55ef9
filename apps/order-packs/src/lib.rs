//! # Order Packs
//!
//! Order orchestration: stored catalog in, stored order out.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order Packs Services                            │
//! │                                                                         │
//! │  ┌────────────────────────┐        ┌────────────────────────┐          │
//! │  │  OrderService          │        │  PackService           │          │
//! │  │                        │        │                        │          │
//! │  │ • create_order         │        │ • get_packs            │          │
//! │  │ • place_order          │        │ • save_packs           │          │
//! │  │ • recent_orders        │        │                        │          │
//! │  │ • get_order            │        │                        │          │
//! │  └───────────┬────────────┘        └───────────┬────────────┘          │
//! │              │ OrderStore                      │ PackStore             │
//! │              ▼                                 ▼                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 packs-db (SQLite)                                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DB_PATH` - SQLite database file (default: ./data/app.db)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `MAX_ORDER_ITEM_COUNT` - Largest orderable item count (default: 1000000)
//! - `MAX_PACK_SIZES` - Largest catalog (default: 50)
//! - `MAX_PACK_SIZE` - Largest single pack (default: 100000)
//! - `RECENT_ORDERS_LIMIT` - Orders listed by `orders` (default: 10)

pub mod config;
pub mod error;
pub mod logging;
pub mod services;
pub mod store;

// Re-exports
pub use config::{AppConfig, ConfigError};
pub use error::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use services::{OrderService, PackService};

use packs_db::{Database, DbConfig, OrderRepository, PackRepository};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}

impl AppState {
    /// Opens (and migrates) the configured database.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let db_config = DbConfig::new(&config.db_path).max_connections(config.db_max_connections);
        let db = Database::new(db_config).await?;
        Ok(AppState { db, config })
    }

    /// Wraps an already open database.
    pub fn with_database(db: Database, config: AppConfig) -> Self {
        AppState { db, config }
    }

    pub fn order_service(&self) -> OrderService<OrderRepository> {
        OrderService::new(self.db.orders(), &self.config)
    }

    pub fn pack_service(&self) -> PackService<PackRepository> {
        PackService::new(self.db.packs(), &self.config)
    }
}
