//! # Storage Seams
//!
//! Async traits the services depend on instead of concrete repositories.
//!
//! ```text
//! OrderService ──► OrderStore ──┬── OrderRepository (SQLite)
//!                               └── in-memory mock  (tests)
//! PackService  ──► PackStore  ──┬── PackRepository  (SQLite)
//!                               └── in-memory mock  (tests)
//! ```

use std::future::Future;

use packs_core::{Order, PackSize};
use packs_db::{DbResult, OrderRepository, PackRepository};

/// Source of the pack catalog.
pub trait PackStore: Send + Sync {
    /// Current catalog, ascending by size.
    fn list_packs(&self) -> impl Future<Output = DbResult<Vec<PackSize>>> + Send;

    /// Atomically replaces the catalog.
    fn replace_packs(&self, sizes: &[PackSize]) -> impl Future<Output = DbResult<()>> + Send;
}

/// Order history storage.
pub trait OrderStore: Send + Sync {
    fn insert_order(&self, order: &Order) -> impl Future<Output = DbResult<()>> + Send;

    /// Up to `limit` orders, newest first.
    fn recent_orders(&self, limit: u32) -> impl Future<Output = DbResult<Vec<Order>>> + Send;

    fn find_order(&self, id: &str) -> impl Future<Output = DbResult<Option<Order>>> + Send;
}

impl PackStore for PackRepository {
    async fn list_packs(&self) -> DbResult<Vec<PackSize>> {
        self.list().await
    }

    async fn replace_packs(&self, sizes: &[PackSize]) -> DbResult<()> {
        self.replace_all(sizes).await
    }
}

impl OrderStore for OrderRepository {
    async fn insert_order(&self, order: &Order) -> DbResult<()> {
        self.insert(order).await
    }

    async fn recent_orders(&self, limit: u32) -> DbResult<Vec<Order>> {
        self.recent(limit).await
    }

    async fn find_order(&self, id: &str) -> DbResult<Option<Order>> {
        self.get_by_id(id).await
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use packs_db::DbError;
    use std::sync::Mutex;

    /// In-memory catalog. `failing` makes every call return a query error.
    #[derive(Debug, Default)]
    pub struct MemoryPacks {
        pub sizes: Mutex<Vec<PackSize>>,
        pub failing: bool,
    }

    impl MemoryPacks {
        pub fn with_sizes(raw: &[u32]) -> Self {
            MemoryPacks {
                sizes: Mutex::new(raw.iter().filter_map(|&s| PackSize::new(s)).collect()),
                failing: false,
            }
        }

        pub fn failing() -> Self {
            MemoryPacks {
                failing: true,
                ..Default::default()
            }
        }
    }

    impl PackStore for MemoryPacks {
        async fn list_packs(&self) -> DbResult<Vec<PackSize>> {
            if self.failing {
                return Err(DbError::QueryFailed("packs unavailable".to_string()));
            }
            let mut sizes = self.sizes.lock().unwrap().clone();
            sizes.sort_unstable();
            Ok(sizes)
        }

        async fn replace_packs(&self, sizes: &[PackSize]) -> DbResult<()> {
            if self.failing {
                return Err(DbError::QueryFailed("packs unavailable".to_string()));
            }
            *self.sizes.lock().unwrap() = sizes.to_vec();
            Ok(())
        }
    }

    /// In-memory order history, insertion ordered.
    #[derive(Debug, Default)]
    pub struct MemoryOrders {
        pub orders: Mutex<Vec<Order>>,
        pub failing: bool,
    }

    impl MemoryOrders {
        pub fn failing() -> Self {
            MemoryOrders {
                failing: true,
                ..Default::default()
            }
        }

        pub fn len(&self) -> usize {
            self.orders.lock().unwrap().len()
        }
    }

    impl OrderStore for MemoryOrders {
        async fn insert_order(&self, order: &Order) -> DbResult<()> {
            if self.failing {
                return Err(DbError::QueryFailed("orders unavailable".to_string()));
            }
            self.orders.lock().unwrap().push(order.clone());
            Ok(())
        }

        async fn recent_orders(&self, limit: u32) -> DbResult<Vec<Order>> {
            if self.failing {
                return Err(DbError::QueryFailed("orders unavailable".to_string()));
            }
            let orders = self.orders.lock().unwrap();
            Ok(orders.iter().rev().take(limit as usize).cloned().collect())
        }

        async fn find_order(&self, id: &str) -> DbResult<Option<Order>> {
            if self.failing {
                return Err(DbError::QueryFailed("orders unavailable".to_string()));
            }
            let orders = self.orders.lock().unwrap();
            Ok(orders.iter().find(|o| o.id == id).cloned())
        }
    }
}
