//! Clean/dirty record assembly.
//!
//! One call builds the whole dataset for a run. The draw sequence is
//! fixed: healthy ratio, per-sector weights, then for every slot the
//! health decision, vendor, contact offset, detection offset,
//! criticality and (for dirty rows) vulnerability and scenario. Callers
//! that need reproducible output seed the RNG and pin `now`.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::error::{ForgeError, ForgeResult};
use crate::gen::plan;
use crate::gen::record::{Criticality, RecordDates, RiskRecord};
use crate::pool::{PoolSet, VendorRow};

/// Synthesizes `count` records from the reference pools.
///
/// A fraction of the dataset (drawn from `[0.3, 0.7)` per run) stays
/// clean; the rest carries a vulnerability and a scenario. Records come
/// out grouped by sector in the vendor pool's sector order. Pools are
/// checked before any record is built, so a failed call never leaves a
/// partial dataset behind.
pub fn synthesize<R: Rng>(
    pools: &PoolSet,
    count: usize,
    enriched: bool,
    rng: &mut R,
    now: DateTime<Utc>,
) -> ForgeResult<Vec<RiskRecord>> {
    if count == 0 {
        return Err(ForgeError::InvalidInput(
            "record count must be at least 1".to_string(),
        ));
    }
    if pools.vendors.is_empty() {
        return Err(ForgeError::EmptyPool("vendors"));
    }
    if pools.vulns.is_empty() {
        return Err(ForgeError::EmptyPool("vulnerabilities"));
    }
    if pools.scenarios.is_empty() {
        return Err(ForgeError::EmptyPool("scenarios"));
    }

    let healthy_ratio: f64 = rng.gen_range(0.3..0.7);
    let mut good_budget = (count as f64 * healthy_ratio) as usize;

    let sectors = pools.sectors();
    let mut allocation = plan::plan(&sectors, count, rng)?;
    plan::rebalance(&mut allocation, count);

    let mut dataset = Vec::with_capacity(count);
    for (sector, slots) in &allocation.entries {
        for _ in 0..*slots {
            // The uniform draw is only consumed while clean slots remain.
            let is_good = good_budget > 0 && rng.gen::<f64>() < healthy_ratio;
            let vendor = sample_vendor(pools, sector, rng);
            let dates = sample_dates(rng, now);
            let criticality = Criticality::sample(rng);

            let record = if is_good {
                good_budget -= 1;
                RiskRecord::clean(vendor, criticality, dates, enriched)
            } else {
                let vuln = &pools.vulns[rng.gen_range(0..pools.vulns.len())];
                let scenario = &pools.scenarios[rng.gen_range(0..pools.scenarios.len())];
                RiskRecord::dirty(vendor, criticality, dates, vuln, scenario, enriched)
            };
            dataset.push(record);
        }
    }

    Ok(dataset)
}

/// Uniform pick from the sector's vendors, falling back to the whole
/// pool when the sector has none.
fn sample_vendor<'a, R: Rng>(pools: &'a PoolSet, sector: &str, rng: &mut R) -> &'a VendorRow {
    match pools.vendors_in(sector) {
        Some(ids) if !ids.is_empty() => &pools.vendors[ids[rng.gen_range(0..ids.len())]],
        _ => &pools.vendors[rng.gen_range(0..pools.vendors.len())],
    }
}

fn sample_dates<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> RecordDates {
    let days_ago = rng.gen_range(1..=100);
    let delay = rng.gen_range(0..=30);
    RecordDates {
        last_contact_date: (now - Duration::days(days_ago)).format("%Y-%m-%d").to_string(),
        days_since_last_contact: days_ago,
        detection_date: (now - Duration::days(delay)).format("%Y-%m-%d").to_string(),
        detection_delay_days: delay,
    }
}

// ============================================================================
// TESTS
// ============================================================================
