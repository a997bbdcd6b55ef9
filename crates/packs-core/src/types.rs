//! # Domain Types
//!
//! Core domain types used throughout Order Packs.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    PackSize     │   │  PackSelection  │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  u32 (> 0)      │   │  packs (map)    │   │  id (UUID)      │       │
//! │  │  250, 500, ...  │   │  total_items    │   │  requested      │       │
//! │  └─────────────────┘   │  total_packs    │   │  shipped        │       │
//! │                        └─────────────────┘   │  packs (map)    │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  status         │       │
//! │  │  OrderRequest   │   │   OrderStatus   │   │  created_at     │       │
//! │  │  ─────────────  │   │  ─────────────  │   └─────────────────┘       │
//! │  │  item_count     │   │  New, Pending,  │                             │
//! │  └─────────────────┘   │  Packed, Shipped│                             │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pack Maps
//! Every per-size count map is a `BTreeMap<PackSize, u64>`: iteration is
//! ascending by size and only sizes actually used appear.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Pack Size
// =============================================================================

/// One catalog entry: an indivisible number of items shipped as a unit.
///
/// Always positive. The only ways to build one are [`PackSize::new`] and the
/// `TryFrom` impls, so a zero-sized pack cannot reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PackSize(u32);

impl PackSize {
    /// Creates a pack size, or `None` for zero.
    #[inline]
    pub const fn new(size: u32) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(PackSize(size))
        }
    }

    /// Number of items in one pack.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PackSize> for u32 {
    fn from(size: PackSize) -> Self {
        size.0
    }
}

impl TryFrom<u32> for PackSize {
    type Error = ValidationError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        PackSize::new(size).ok_or_else(|| ValidationError::MustBePositive {
            field: "pack size".to_string(),
        })
    }
}

impl TryFrom<i64> for PackSize {
    type Error = ValidationError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        if size <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "pack size".to_string(),
            });
        }
        let size = u32::try_from(size).map_err(|_| ValidationError::OutOfRange {
            field: "pack size".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        })?;
        PackSize::try_from(size)
    }
}

// =============================================================================
// Pack Selection
// =============================================================================

/// Result of one engine run: which packs to ship and how many of each.
///
/// Built fresh per call and never mutated afterwards. The totals are always
/// consistent with the map (`total_items = Σ size × count`,
/// `total_packs = Σ count`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSelection {
    requested: i64,
    packs: BTreeMap<PackSize, u64>,
    total_items: u64,
    total_packs: u64,
}

impl PackSelection {
    pub(crate) fn new(
        requested: i64,
        packs: BTreeMap<PackSize, u64>,
        total_items: u64,
        total_packs: u64,
    ) -> Self {
        PackSelection {
            requested,
            packs,
            total_items,
            total_packs,
        }
    }

    /// The item count this selection was computed for.
    #[inline]
    pub fn requested(&self) -> i64 {
        self.requested
    }

    /// Per-size pack counts, ascending by size.
    #[inline]
    pub fn packs(&self) -> &BTreeMap<PackSize, u64> {
        &self.packs
    }

    /// Total items shipped.
    #[inline]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total number of packs shipped.
    #[inline]
    pub fn total_packs(&self) -> u64 {
        self.total_packs
    }

    /// Items shipped beyond the requested count.
    pub fn overshoot(&self) -> u64 {
        self.total_items
            .saturating_sub(u64::try_from(self.requested).unwrap_or(0))
    }

    /// Consumes the selection, returning the per-size map.
    pub fn into_packs(self) -> BTreeMap<PackSize, u64> {
        self.packs
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// A customer's order: just the number of items wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub item_count: i64,
}

impl OrderRequest {
    pub fn new(item_count: i64) -> Self {
        OrderRequest { item_count }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order was just calculated and recorded.
    #[default]
    New,
    /// Waiting to be packed.
    Pending,
    /// Packs have been assembled.
    Packed,
    /// Left the warehouse.
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Pending => "pending",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A persisted order record.
///
/// Snapshot pattern: the pack map is frozen at calculation time, so later
/// catalog changes never alter historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Items the customer asked for.
    pub requested_item_count: i64,

    /// Items actually shipped (≥ requested).
    pub shipped_item_count: u64,

    /// Number of packs shipped.
    pub total_packs: u64,

    /// Packs used, by size.
    pub packs: BTreeMap<PackSize, u64>,

    pub status: OrderStatus,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a `New` order from an engine result.
    pub fn from_selection(
        id: impl Into<String>,
        selection: PackSelection,
        created_at: DateTime<Utc>,
    ) -> Self {
        Order {
            id: id.into(),
            requested_item_count: selection.requested(),
            shipped_item_count: selection.total_items(),
            total_packs: selection.total_packs(),
            packs: selection.into_packs(),
            status: OrderStatus::New,
            created_at,
        }
    }

    /// Items shipped beyond the requested count.
    pub fn overshoot(&self) -> u64 {
        self.shipped_item_count
            .saturating_sub(u64::try_from(self.requested_item_count).unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
