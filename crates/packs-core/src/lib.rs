//! # packs-core: Pack Selection Engine for Order Packs
//!
//! This crate is the **heart** of Order Packs. It decides which packs to
//! ship for an order, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Packs Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 order-packs (CLI + services)                    │   │
//! │  │    calculate, order, orders, packs, set-packs                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ packs-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │ calculator │  │ validation│                 │   │
//! │  │   │ PackSize  │  │  DP search │  │   rules   │                 │   │
//! │  │   │  Order    │  │  rebuild   │  │  limits   │                 │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    packs-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - The pack selection engine
//! - [`types`] - Domain types (PackSize, PackSelection, Order, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same catalog + same count = same selection
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use packs_core::{calculate_packs, PackSize};
//!
//! let catalog: Vec<PackSize> = [250, 500, 1000, 2000, 5000]
//!     .into_iter()
//!     .filter_map(PackSize::new)
//!     .collect();
//!
//! // 501 items: 250 + 500 beats a single 1000 (fewer items wins)
//! let selection = calculate_packs(&catalog, 501).unwrap();
//! assert_eq!(selection.total_items(), 750);
//! assert_eq!(selection.total_packs(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::calculate_packs;
pub use error::{PackingError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Pack sizes a fresh installation starts with.
///
/// The same values are seeded by the initial database migration.
pub const DEFAULT_PACK_SIZES: [u32; 5] = [250, 500, 1000, 2000, 5000];
