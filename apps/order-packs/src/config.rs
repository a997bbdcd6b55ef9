//! Application configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable               | Default          |
//! |------------------------|------------------|
//! | `DB_PATH`              | `./data/app.db`  |
//! | `DB_MAX_CONNECTIONS`   | `5`              |
//! | `MAX_ORDER_ITEM_COUNT` | `1000000`        |
//! | `MAX_PACK_SIZES`       | `50`             |
//! | `MAX_PACK_SIZE`        | `100000`         |
//! | `RECENT_ORDERS_LIMIT`  | `10`             |

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Order Packs configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// SQLite pool size
    pub db_max_connections: u32,

    /// Largest item count a single order may request
    pub max_order_item_count: i64,

    /// Largest number of distinct sizes the catalog may hold
    pub max_pack_sizes: usize,

    /// Largest single pack size the catalog may hold
    pub max_pack_size: u32,

    /// How many orders `recent_orders` returns
    pub recent_orders_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from("./data/app.db"),
            db_max_connections: 5,
            max_order_item_count: 1_000_000,
            max_pack_sizes: 50,
            max_pack_size: 100_000,
            recent_orders_limit: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let config = AppConfig {
            db_path: lookup("DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),

            db_max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,

            max_order_item_count: parse_or(
                &lookup,
                "MAX_ORDER_ITEM_COUNT",
                defaults.max_order_item_count,
            )?,

            max_pack_sizes: parse_or(&lookup, "MAX_PACK_SIZES", defaults.max_pack_sizes)?,

            max_pack_size: parse_or(&lookup, "MAX_PACK_SIZE", defaults.max_pack_size)?,

            recent_orders_limit: parse_or(
                &lookup,
                "RECENT_ORDERS_LIMIT",
                defaults.recent_orders_limit,
            )?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.max_order_item_count <= 0 {
            return Err(ConfigError::InvalidValue("MAX_ORDER_ITEM_COUNT".to_string()));
        }
        if config.max_pack_sizes == 0 {
            return Err(ConfigError::InvalidValue("MAX_PACK_SIZES".to_string()));
        }
        if config.max_pack_size == 0 {
            return Err(ConfigError::InvalidValue("MAX_PACK_SIZE".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
