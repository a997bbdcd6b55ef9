//! # Order Repository
//!
//! Database operations for the order history.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       orders table                                      │
//! │                                                                         │
//! │  Order (packs-core)               orders row                            │
//! │  ─────────────────               ──────────                            │
//! │  id                     ──►      id TEXT                               │
//! │  requested_item_count   ──►      requested_item_count INTEGER          │
//! │  shipped_item_count     ──►      shipped_item_count INTEGER            │
//! │  total_packs            ──►      total_packs INTEGER                   │
//! │  packs {250: 1, ...}    ──►      packs_json TEXT '{"250":1,...}'       │
//! │  status                 ──►      status TEXT 'new'                     │
//! │  created_at             ──►      created_at TEXT (RFC 3339)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are written once and never updated by this crate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use packs_core::{Order, OrderStatus, PackSize};

/// Raw `orders` row before the pack map is decoded.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    requested_item_count: i64,
    shipped_item_count: i64,
    total_packs: i64,
    packs_json: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let packs: BTreeMap<PackSize, u64> = serde_json::from_str(&row.packs_json)?;

        Ok(Order {
            id: row.id,
            requested_item_count: row.requested_item_count,
            shipped_item_count: to_u64("shipped_item_count", row.shipped_item_count)?,
            total_packs: to_u64("total_packs", row.total_packs)?,
            packs,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

fn to_u64(column: &str, value: i64) -> DbResult<u64> {
    u64::try_from(value).map_err(|_| DbError::Serialization(format!("{column} is negative: {value}")))
}

fn to_i64(column: &str, value: u64) -> DbResult<i64> {
    i64::try_from(value)
        .map_err(|_| DbError::Serialization(format!("{column} exceeds integer range: {value}")))
}

const SELECT_ORDER: &str = r#"
    SELECT
        id,
        requested_item_count,
        shipped_item_count,
        total_packs,
        packs_json,
        status,
        created_at
    FROM orders
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a calculated order.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(
            id = %order.id,
            requested = order.requested_item_count,
            shipped = order.shipped_item_count,
            "Inserting order"
        );

        let packs_json = serde_json::to_string(&order.packs)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, requested_item_count, shipped_item_count, total_packs,
                packs_json, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&order.id)
        .bind(order.requested_item_count)
        .bind(to_i64("shipped_item_count", order.shipped_item_count)?)
        .bind(to_i64("total_packs", order.total_packs)?)
        .bind(packs_json)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns up to `limit` orders, newest first.
    ///
    /// Orders sharing a timestamp come back in reverse insertion order.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Order>> {
        let sql = format!("{SELECT_ORDER} ORDER BY created_at DESC, rowid DESC LIMIT ?1");

        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("{SELECT_ORDER} WHERE id = ?1");

        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Counts all stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
