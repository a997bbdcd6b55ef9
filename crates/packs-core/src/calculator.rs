//! # Pack Calculator
//!
//! Chooses which packs to ship for a requested item count.
//!
//! ## Rules (in priority order)
//! 1. Only whole packs can be sent. Packs cannot be broken open.
//! 2. Send out the least amount of items that covers the order.
//! 3. Within rule 2, send out as few packs as possible.
//!
//! Rule 2 always wins over rule 3: 750 items in 2 packs beats 1000 items in
//! 1 pack for an order of 501.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bounded DP over exact totals t ∈ [0, requested + max_pack]             │
//! │                                                                         │
//! │  table[t] = None                       t unreachable                    │
//! │           | Some { items, packs, last } best way to hit t exactly       │
//! │                                                                         │
//! │  table[t] ← best over sizes s ≤ t of table[t - s] + one pack of s       │
//! │                                                                         │
//! │  answer   = first reachable t ≥ requested                              │
//! │  packs    = follow `last` from answer back down to 0                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An optimal answer overshoots by less than the largest pack (otherwise
//! dropping that pack still covers the order), so nothing above
//! `requested + max_pack` is ever looked at.
//!
//! ## Example
//! ```rust
//! use packs_core::calculator::calculate_packs;
//! use packs_core::PackSize;
//!
//! let catalog: Vec<PackSize> = [250, 500, 1000, 2000, 5000]
//!     .into_iter()
//!     .filter_map(PackSize::new)
//!     .collect();
//!
//! let selection = calculate_packs(&catalog, 12001).unwrap();
//! assert_eq!(selection.total_items(), 12250);
//! assert_eq!(selection.total_packs(), 4);
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::PackingError;
use crate::types::{PackSelection, PackSize};

/// Best known way to reach one exact total.
#[derive(Debug, Clone, Copy)]
struct Reach {
    items: u64,
    packs: u64,
    last: PackSize,
}

impl Reach {
    /// Rule 2 first, then rule 3. Equal candidates do not replace the
    /// incumbent, so the first one found in ascending size order is kept.
    fn beats(&self, other: &Reach) -> bool {
        (self.items, self.packs) < (other.items, other.packs)
    }
}

/// Returns the catalog sorted ascending with duplicates removed.
///
/// Every tie-break in the search depends on this order.
pub fn canonical_catalog(catalog: &[PackSize]) -> Vec<PackSize> {
    let mut sizes = catalog.to_vec();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Calculates the packs to ship for `requested` items.
///
/// ## Errors
/// - [`PackingError::InvalidQuantity`] when `requested <= 0` or the table
///   for `[0, requested + max_pack]` cannot be allocated
/// - [`PackingError::NoPacksAvailable`] when `catalog` is empty
/// - [`PackingError::NoSolution`] if no total in range is reachable
///
/// ## Cost
/// `O((requested + max_pack) × |catalog|)` time and `O(requested + max_pack)`
/// memory. Callers must bound `requested` before calling.
pub fn calculate_packs(
    catalog: &[PackSize],
    requested: i64,
) -> Result<PackSelection, PackingError> {
    if requested <= 0 {
        return Err(PackingError::InvalidQuantity { requested });
    }

    let sizes = canonical_catalog(catalog);
    let max_size = match sizes.last() {
        Some(size) => size.get() as usize,
        None => return Err(PackingError::NoPacksAvailable),
    };

    let target =
        usize::try_from(requested).map_err(|_| PackingError::InvalidQuantity { requested })?;
    let ceiling = target
        .checked_add(max_size)
        .ok_or(PackingError::InvalidQuantity { requested })?;

    let table =
        fill_table(&sizes, ceiling).ok_or(PackingError::InvalidQuantity { requested })?;

    let (optimal_total, best) = match (target..=ceiling)
        .find_map(|t| table[t].map(|reach| (t, reach)))
    {
        Some(found) => found,
        None => {
            return Err(PackingError::NoSolution {
                requested,
                ceiling: ceiling as u64,
            })
        }
    };

    let packs = reconstruct(&table, optimal_total).ok_or(PackingError::NoSolution {
        requested,
        ceiling: ceiling as u64,
    })?;

    debug!(
        requested,
        ceiling,
        catalog_len = sizes.len(),
        total_items = best.items,
        total_packs = best.packs,
        "Pack selection computed"
    );

    Ok(PackSelection::new(requested, packs, best.items, best.packs))
}

/// Fills the DP table for every exact total in `[0, ceiling]`.
///
/// `None` when the table cannot be allocated.
fn fill_table(sizes: &[PackSize], ceiling: usize) -> Option<Vec<Option<Reach>>> {
    let len = ceiling.checked_add(1)?;
    let mut table: Vec<Option<Reach>> = Vec::new();
    table.try_reserve_exact(len).ok()?;
    table.resize(len, None);

    // Zero items need zero packs; `last` is never read for slot 0.
    table[0] = Some(Reach {
        items: 0,
        packs: 0,
        last: sizes[0],
    });

    for t in 1..=ceiling {
        let mut best: Option<Reach> = None;

        for &size in sizes {
            let step = size.get() as usize;
            if step > t {
                // Ascending order: every remaining size is larger too.
                break;
            }

            let Some(prev) = table[t - step] else {
                continue;
            };

            let (Some(items), Some(packs)) = (
                prev.items.checked_add(u64::from(size.get())),
                prev.packs.checked_add(1),
            ) else {
                continue;
            };

            let candidate = Reach {
                items,
                packs,
                last: size,
            };

            match best {
                Some(current) if !candidate.beats(&current) => {}
                _ => best = Some(candidate),
            }
        }

        table[t] = best;
    }

    Some(table)
}

/// Walks the `last` back-pointers from `total` down to zero.
///
/// `None` only if a slot on the chain is unreachable, which the fill
/// never produces.
fn reconstruct(table: &[Option<Reach>], total: usize) -> Option<BTreeMap<PackSize, u64>> {
    let mut packs = BTreeMap::new();
    let mut remaining = total;

    while remaining > 0 {
        let reach = table[remaining]?;
        *packs.entry(reach.last).or_insert(0) += 1;
        remaining = remaining.checked_sub(reach.last.get() as usize)?;
    }

    Some(packs)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(sizes: &[u32]) -> Vec<PackSize> {
        sizes.iter().map(|&s| PackSize::new(s).unwrap()).collect()
    }

    fn standard() -> Vec<PackSize> {
        catalog(&[250, 500, 1000, 2000, 5000])
    }

    fn packs_of(pairs: &[(u32, u64)]) -> BTreeMap<PackSize, u64> {
        pairs
            .iter()
            .map(|&(s, c)| (PackSize::new(s).unwrap(), c))
            .collect()
    }

    fn assert_selection(
        sizes: &[PackSize],
        requested: i64,
        expected: &[(u32, u64)],
        items: u64,
        packs: u64,
    ) {
        let selection = calculate_packs(sizes, requested).unwrap();
        assert_eq!(selection.packs(), &packs_of(expected), "requested {requested}");
        assert_eq!(selection.total_items(), items, "requested {requested}");
        assert_eq!(selection.total_packs(), packs, "requested {requested}");
        assert_eq!(selection.requested(), requested);
    }

    #[test]
    fn test_single_pack_exact_match() {
        assert_selection(&catalog(&[5]), 5, &[(5, 1)], 5, 1);
    }

    #[test]
    fn test_single_pack_with_overshoot() {
        assert_selection(&catalog(&[5]), 3, &[(5, 1)], 5, 1);
    }

    #[test]
    fn test_multiple_of_the_same_pack() {
        assert_selection(&catalog(&[5]), 12, &[(5, 3)], 15, 3);
    }

    #[test]
    fn test_one_item_uses_smallest_pack() {
        assert_selection(&standard(), 1, &[(250, 1)], 250, 1);
    }

    #[test]
    fn test_exact_smallest_pack() {
        assert_selection(&standard(), 250, &[(250, 1)], 250, 1);
    }

    #[test]
    fn test_251_prefers_one_500_over_two_250() {
        assert_selection(&standard(), 251, &[(500, 1)], 500, 1);
    }

    #[test]
    fn test_501_prefers_fewer_items_over_fewer_packs() {
        // 1x1000 is one pack but 250 more items than 250+500.
        assert_selection(&standard(), 501, &[(250, 1), (500, 1)], 750, 2);
    }

    #[test]
    fn test_12001_mixes_sizes() {
        assert_selection(
            &standard(),
            12001,
            &[(5000, 2), (2000, 1), (250, 1)],
            12250,
            4,
        );
    }

    #[test]
    fn test_non_multiple_sizes_find_exact_total() {
        // 23 + 31 + 53 catalog: 500000 is reachable exactly.
        let selection = calculate_packs(&catalog(&[23, 31, 53]), 500_000).unwrap();
        assert_eq!(selection.total_items(), 500_000);
        assert_eq!(
            selection.packs(),
            &packs_of(&[(23, 2), (31, 7), (53, 9429)])
        );
        assert_eq!(selection.total_packs(), 9438);
    }

    #[test]
    fn test_rule_two_beats_rule_three_with_odd_sizes() {
        // 6 is one 6-pack, not 3+3. 7 is 3+4, not 4+4 or 6+3.
        let sizes = catalog(&[3, 4, 6]);
        assert_selection(&sizes, 6, &[(6, 1)], 6, 1);
        assert_selection(&sizes, 7, &[(3, 1), (4, 1)], 7, 2);
    }

    #[test]
    fn test_input_order_and_duplicates_do_not_matter() {
        let a = calculate_packs(&catalog(&[250, 500, 1000, 2000, 5000]), 12001).unwrap();
        let b = calculate_packs(&catalog(&[5000, 250, 2000, 500, 1000, 250, 5000]), 12001)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_catalog_sorts_and_dedups() {
        assert_eq!(
            canonical_catalog(&catalog(&[500, 250, 500, 1000])),
            catalog(&[250, 500, 1000])
        );
    }

    #[test]
    fn test_invalid_quantities() {
        for requested in [0, -1, i64::MIN] {
            assert_eq!(
                calculate_packs(&standard(), requested),
                Err(PackingError::InvalidQuantity { requested })
            );
        }
    }

    #[test]
    fn test_unallocatable_search_space_is_invalid_quantity() {
        for sizes in [catalog(&[250]), standard(), catalog(&[u32::MAX])] {
            assert_eq!(
                calculate_packs(&sizes, i64::MAX),
                Err(PackingError::InvalidQuantity {
                    requested: i64::MAX
                })
            );
        }
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(
            calculate_packs(&[], 5),
            Err(PackingError::NoPacksAvailable)
        );
    }

    #[test]
    fn test_quantity_checked_before_catalog() {
        assert_eq!(
            calculate_packs(&[], 0),
            Err(PackingError::InvalidQuantity { requested: 0 })
        );
    }

    #[test]
    fn test_consistency_of_totals() {
        let sizes = catalog(&[7, 11, 13]);
        for requested in 1..200 {
            let selection = calculate_packs(&sizes, requested).unwrap();
            let items: u64 = selection
                .packs()
                .iter()
                .map(|(size, count)| u64::from(size.get()) * count)
                .sum();
            let packs: u64 = selection.packs().values().sum();
            assert_eq!(items, selection.total_items());
            assert_eq!(packs, selection.total_packs());
            assert!(selection.packs().values().all(|&c| c > 0));
        }
    }

    // =========================================================================
    // Property tests against an exhaustive oracle
    // =========================================================================

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// Minimal pack count for every exact total up to `limit`, by brute
        /// force over multisets (no tie-break ordering involved).
        fn oracle(sizes: &[u32], limit: usize) -> Vec<Option<u64>> {
            let mut best: Vec<Option<u64>> = vec![None; limit + 1];
            best[0] = Some(0);
            for t in 1..=limit {
                best[t] = sizes
                    .iter()
                    .filter(|&&s| s as usize <= t)
                    .filter_map(|&s| best[t - s as usize].map(|p| p + 1))
                    .min();
            }
            best
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: never undershoot, no smaller covering total exists,
            /// and no multiset of the same total uses fewer packs.
            #[test]
            fn selection_is_optimal(
                sizes in prop::collection::vec(1u32..60, 1..5),
                requested in 1i64..400,
            ) {
                let catalog: Vec<PackSize> =
                    sizes.iter().filter_map(|&s| PackSize::new(s)).collect();
                let selection = calculate_packs(&catalog, requested).unwrap();

                let limit = requested as usize + *sizes.iter().max().unwrap() as usize;
                let truth = oracle(&sizes, limit);

                let total = selection.total_items() as usize;
                prop_assert!(total as i64 >= requested);
                prop_assert!((requested as usize..total).all(|t| truth[t].is_none()));
                prop_assert_eq!(Some(selection.total_packs()), truth[total]);
            }

            /// Property: catalog order and duplicates never change the result.
            #[test]
            fn selection_is_deterministic(
                sizes in prop::collection::vec(1u32..60, 1..6),
                requested in 1i64..400,
            ) {
                let catalog: Vec<PackSize> =
                    sizes.iter().filter_map(|&s| PackSize::new(s)).collect();
                let mut shuffled = catalog.clone();
                shuffled.reverse();
                shuffled.extend_from_slice(&catalog);

                let a = calculate_packs(&catalog, requested).unwrap();
                let b = calculate_packs(&shuffled, requested).unwrap();
                prop_assert_eq!(a, b);
            }
        }
    }
}
