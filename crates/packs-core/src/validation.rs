//! # Validation Module
//!
//! Input validation utilities for Order Packs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Type validation (argument parsing)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (order-packs)                                       │
//! │  └── THIS MODULE: business rule validation + configured limits         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE pack sizes                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Limits are always passed in by the caller; nothing here hard-codes the
//! maximum order size.

use crate::calculator::canonical_catalog;
use crate::error::ValidationError;
use crate::types::PackSize;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested item count against the configured maximum.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
///
/// ## Example
/// ```rust
/// use packs_core::validation::validate_item_count;
///
/// assert!(validate_item_count(12001, 1_000_000).is_ok());
/// assert!(validate_item_count(0, 1_000_000).is_err());
/// assert!(validate_item_count(1_000_001, 1_000_000).is_err());
/// ```
pub fn validate_item_count(count: i64, max: i64) -> ValidationResult<()> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "item count".to_string(),
        });
    }

    if count > max {
        return Err(ValidationError::OutOfRange {
            field: "item count".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates raw pack sizes and returns the canonical catalog.
///
/// ## Rules
/// - At least one size
/// - Every size positive and at most `max_size`
/// - At most `max_entries` distinct sizes
///
/// `max_size` bounds the engine's search space together with the
/// maximum item count, since the table spans `requested + largest pack`.
///
/// ## Returns
/// Sizes sorted ascending with duplicates removed.
///
/// ## Example
/// ```rust
/// use packs_core::validation::validate_pack_sizes;
///
/// let sizes = validate_pack_sizes(&[500, 250, 500], 50, 10_000).unwrap();
/// assert_eq!(sizes.iter().map(|s| s.get()).collect::<Vec<_>>(), vec![250, 500]);
///
/// assert!(validate_pack_sizes(&[], 50, 10_000).is_err());
/// assert!(validate_pack_sizes(&[250, 0], 50, 10_000).is_err());
/// assert!(validate_pack_sizes(&[20_000], 50, 10_000).is_err());
/// ```
pub fn validate_pack_sizes(
    raw: &[i64],
    max_entries: usize,
    max_size: u32,
) -> ValidationResult<Vec<PackSize>> {
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "packs".to_string(),
        });
    }

    let sizes = raw
        .iter()
        .map(|&size| {
            let pack = PackSize::try_from(size)?;
            if pack.get() > max_size {
                return Err(ValidationError::OutOfRange {
                    field: "pack size".to_string(),
                    min: 1,
                    max: i64::from(max_size),
                });
            }
            Ok(pack)
        })
        .collect::<ValidationResult<Vec<_>>>()?;

    let sizes = canonical_catalog(&sizes);

    if sizes.len() > max_entries {
        return Err(ValidationError::OutOfRange {
            field: "number of pack sizes".to_string(),
            min: 1,
            max: i64::try_from(max_entries).unwrap_or(i64::MAX),
        });
    }

    Ok(sizes)
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an order id (UUID format).
///
/// ## Example
/// ```rust
/// use packs_core::validation::validate_order_id;
///
/// assert!(validate_order_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_order_id("not-a-uuid").is_err());
/// ```
pub fn validate_order_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "order id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "order id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_count() {
        assert!(validate_item_count(1, 10).is_ok());
        assert!(validate_item_count(10, 10).is_ok());

        assert!(matches!(
            validate_item_count(0, 10),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_item_count(-1, 10),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(
            validate_item_count(11, 10),
            Err(ValidationError::OutOfRange {
                field: "item count".to_string(),
                min: 1,
                max: 10,
            })
        );
    }

    #[test]
    fn test_validate_pack_sizes_canonicalizes() {
        let sizes = validate_pack_sizes(&[5000, 250, 1000, 250], 10, 5000).unwrap();
        let raw: Vec<u32> = sizes.iter().map(|s| s.get()).collect();
        assert_eq!(raw, vec![250, 1000, 5000]);
    }

    #[test]
    fn test_validate_pack_sizes_rejects_bad_input() {
        assert!(matches!(
            validate_pack_sizes(&[], 10, 5000),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_pack_sizes(&[250, -3], 10, 5000),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_pack_sizes(&[i64::from(u32::MAX) + 1], 10, u32::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_pack_sizes_limit_counts_distinct_sizes() {
        assert!(validate_pack_sizes(&[1, 2, 2, 2], 2, 10).is_ok());
        assert!(validate_pack_sizes(&[1, 2, 3], 2, 10).is_err());
    }

    #[test]
    fn test_validate_pack_sizes_caps_magnitude() {
        assert!(validate_pack_sizes(&[250, 5000], 10, 5000).is_ok());
        assert_eq!(
            validate_pack_sizes(&[250, 4_000_000_000], 10, 1_000_000),
            Err(ValidationError::OutOfRange {
                field: "pack size".to_string(),
                min: 1,
                max: 1_000_000,
            })
        );
    }

    #[test]
    fn test_validate_order_id() {
        assert!(validate_order_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_order_id("").is_err());
        assert!(validate_order_id("123").is_err());
    }
}
