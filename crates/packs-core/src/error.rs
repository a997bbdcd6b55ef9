//! # Error Types
//!
//! Domain-specific error types for packs-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  packs-core errors (this file)                                         │
//! │  ├── PackingError     - Pack selection engine failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  packs-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  order-packs app errors                                                │
//! │  └── AppError         - What the CLI reports (with an ErrorCode)       │
//! │                                                                         │
//! │  Flow: PackingError/ValidationError → AppError                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (requested count, field, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Packing Error
// =============================================================================

/// Failures of the pack selection engine.
///
/// Identical inputs always produce the identical error, so none of these is
/// retryable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackingError {
    /// Requested count is zero or negative, or too large to build a search
    /// space for.
    ///
    /// ## When This Occurs
    /// - Customer asked for `0` or a negative number of items
    /// - The table for `[0, requested + largest pack]` cannot be allocated
    #[error("requested count {requested} is not valid")]
    InvalidQuantity { requested: i64 },

    /// The catalog has no pack sizes at all.
    #[error("no packs available to fulfill the order")]
    NoPacksAvailable,

    /// No achievable total was found in `[requested, ceiling]`.
    ///
    /// Unreachable for a non-empty catalog of positive sizes. Seeing it
    /// means the search ceiling is wrong.
    #[error("no valid combination found for {requested} items (searched up to {ceiling})")]
    NoSolution { requested: i64, ceiling: u64 },
}

impl PackingError {
    /// True for errors caused by caller input rather than configuration or
    /// an internal fault.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PackingError::InvalidQuantity { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
