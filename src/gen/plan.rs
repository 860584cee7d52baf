//! Weighted distribution of the record budget across sectors.
//!
//! Each sector draws one uniform weight, weights are normalized to
//! rounded integer percentages, and each sector receives a truncated
//! share of the total. The raw plan can miss the requested total in two
//! ways: truncation drops less than one record per sector, and the
//! rounded percentages can sum a few points away from 100, a gap that
//! scales with the total. [`rebalance`] settles the difference
//! deterministically.

use rand::Rng;

use crate::error::{ForgeError, ForgeResult};

/// Ordered (sector, count) allocation.
///
/// Entry order follows the category order handed to [`plan`]; downstream
/// iteration relies on it staying stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAllocation {
    pub entries: Vec<(String, usize)>,
}

impl CategoryAllocation {
    /// Sum of all per-category counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

/// Plans how many records each category receives out of `total`.
///
/// Draws one weight in `[5, 25]` per category, in the given order.
pub fn plan<R: Rng>(
    categories: &[&str],
    total: usize,
    rng: &mut R,
) -> ForgeResult<CategoryAllocation> {
    if categories.is_empty() {
        return Err(ForgeError::InvalidInput(
            "no categories to allocate across".to_string(),
        ));
    }

    let weights: Vec<u32> = categories.iter().map(|_| rng.gen_range(5..=25)).collect();
    let weight_sum: u32 = weights.iter().sum();

    let entries = categories
        .iter()
        .zip(&weights)
        .map(|(category, w)| {
            let pct = (*w as f64 * 100.0 / weight_sum as f64).round() as usize;
            let count = total * pct / 100;
            (category.to_string(), count)
        })
        .collect();

    Ok(CategoryAllocation { entries })
}

/// Adjusts an allocation in place so its counts sum to exactly `total`.
///
/// Walks the entries in order, adding one slot at a time while short and
/// removing one from non-empty entries while over. The walk is purely
/// positional, so the same input always settles the same way.
pub fn rebalance(allocation: &mut CategoryAllocation, total: usize) {
    let len = allocation.entries.len();
    if len == 0 {
        return;
    }

    let mut current = allocation.total();
    let mut cursor = 0;
    while current < total {
        allocation.entries[cursor % len].1 += 1;
        current += 1;
        cursor += 1;
    }
    while current > total {
        let entry = &mut allocation.entries[cursor % len];
        if entry.1 > 0 {
            entry.1 -= 1;
            current -= 1;
        }
        cursor += 1;
    }
}

// ============================================================================
// TESTS
// ============================================================================
