//! # Repository Module
//!
//! Database repository implementations for Order Packs.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  OrderService / PackService (order-packs)                              │
//! │       │                                                                 │
//! │       │  db.orders().recent(10)                                        │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── insert(&self, order)                                              │
//! │  ├── recent(&self, limit)                                              │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PackRepository`](pack::PackRepository) - Pack catalog read and replace
//! - [`OrderRepository`](order::OrderRepository) - Order history

pub mod order;
pub mod pack;
