//! Order service.
//!
//! Turns an item count into a stored order.
//!
//! ```text
//! place_order(request, packs)
//!      │
//!      ├── packs.list_packs()            current catalog
//!      ▼
//! create_order(request, catalog)
//!      │
//!      ├── quote()                       limit checks + engine
//!      ├── Order::from_selection()       status = new, created_at = now
//!      └── orders.insert_order()
//! ```

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use packs_core::validation::{validate_item_count, validate_order_id};
use packs_core::{
    calculate_packs, Order, OrderRequest, PackSelection, PackSize, PackingError, ValidationError,
};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::store::{OrderStore, PackStore};

/// Bounds on the engine's search space (`requested + largest pack`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLimits {
    pub max_item_count: i64,
    pub max_pack_size: u32,
}

impl From<&AppConfig> for OrderLimits {
    fn from(config: &AppConfig) -> Self {
        OrderLimits {
            max_item_count: config.max_order_item_count,
            max_pack_size: config.max_pack_size,
        }
    }
}

/// Validates a request and runs the engine without storing anything.
///
/// Counts above `max_item_count`, and catalogs holding a pack above
/// `max_pack_size`, are rejected before the engine runs.
pub fn quote(
    request: OrderRequest,
    catalog: &[PackSize],
    limits: OrderLimits,
) -> AppResult<PackSelection> {
    validate_item_count(request.item_count, limits.max_item_count)?;

    if let Some(largest) = catalog.iter().max() {
        if largest.get() > limits.max_pack_size {
            warn!(
                largest = largest.get(),
                limit = limits.max_pack_size,
                "Catalog exceeds pack size limit"
            );
            return Err(ValidationError::OutOfRange {
                field: "pack size".to_string(),
                min: 1,
                max: i64::from(limits.max_pack_size),
            }
            .into());
        }
    }

    match calculate_packs(catalog, request.item_count) {
        Ok(selection) => Ok(selection),
        Err(e @ PackingError::NoSolution { .. }) => {
            error!(
                requested = request.item_count,
                catalog = ?catalog,
                error = %e,
                "Pack search found no solution for a non-empty catalog"
            );
            Err(e.into())
        }
        Err(e) => {
            warn!(requested = request.item_count, error = %e, "Order calculation failed");
            Err(e.into())
        }
    }
}

/// Creates and lists orders.
#[derive(Debug, Clone)]
pub struct OrderService<O> {
    orders: O,
    limits: OrderLimits,
    recent_limit: u32,
}

impl<O: OrderStore> OrderService<O> {
    /// Create a new order service.
    pub fn new(orders: O, config: &AppConfig) -> Self {
        OrderService {
            orders,
            limits: OrderLimits::from(config),
            recent_limit: config.recent_orders_limit,
        }
    }

    /// Calculates packs for `request` against `catalog` and stores the order.
    pub async fn create_order(
        &self,
        request: OrderRequest,
        catalog: &[PackSize],
    ) -> AppResult<Order> {
        let selection = quote(request, catalog, self.limits)?;

        let order = Order::from_selection(Uuid::new_v4().to_string(), selection, Utc::now());
        self.orders.insert_order(&order).await?;

        info!(
            id = %order.id,
            requested = order.requested_item_count,
            shipped = order.shipped_item_count,
            packs = order.total_packs,
            "Order created"
        );

        Ok(order)
    }

    /// Loads the current catalog from `packs`, then creates the order.
    pub async fn place_order<P: PackStore>(
        &self,
        request: OrderRequest,
        packs: &P,
    ) -> AppResult<Order> {
        let catalog = packs.list_packs().await?;
        self.create_order(request, &catalog).await
    }

    /// The most recent orders, newest first.
    pub async fn recent_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.recent_orders(self.recent_limit).await?)
    }

    /// Fetches one order by id.
    pub async fn get_order(&self, id: &str) -> AppResult<Order> {
        validate_order_id(id)?;

        self.orders
            .find_order(id.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Order", id.trim()))
    }
}
