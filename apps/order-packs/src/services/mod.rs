//! Service layer.
//!
//! Services hold policy (limits from [`AppConfig`](crate::config::AppConfig))
//! and talk to storage only through the traits in [`crate::store`].

pub mod order_service;
pub mod pack_service;

pub use order_service::{quote, OrderLimits, OrderService};
pub use pack_service::PackService;
