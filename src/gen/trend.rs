//! Trend aggregation over a synthesized dataset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gen::record::{RiskRecord, NOT_APPLICABLE};

/// Headline summary of one generated dataset.
///
/// The `dirty_ratio`/`clean_ratio` wire names are kept for the ingestion
/// pipeline; both fields hold absolute counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub timestamp: String,
    pub region_spike: String,
    pub sector_spike: String,
    pub new_cve: String,
    pub description: String,
    #[serde(rename = "dirty_ratio")]
    pub dirty_count: usize,
    #[serde(rename = "clean_ratio")]
    pub clean_count: usize,
}

/// Summarizes where risk concentrated in one dataset.
///
/// Spike fields name the most frequent region and sector among dirty
/// records; the representative finding is the first dirty record in
/// dataset order. All of them fall back to `"N/A"` on an all-clean run.
pub fn aggregate(dataset: &[RiskRecord], now: DateTime<Utc>) -> TrendSummary {
    let dirty: Vec<&RiskRecord> = dataset.iter().filter(|r| !r.is_clean()).collect();
    let (new_cve, description) = match dirty.first() {
        Some(r) => (r.cve_id.clone(), r.description.clone()),
        None => (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string()),
    };

    TrendSummary {
        timestamp: now.format("%Y-%m-%d %H:%M").to_string(),
        region_spike: most_frequent(dirty.iter().map(|r| r.region.as_str())),
        sector_spike: most_frequent(dirty.iter().map(|r| r.sector.as_str())),
        new_cve,
        description,
        dirty_count: dirty.len(),
        clean_count: dataset.len() - dirty.len(),
    }
}

/// Most frequent value, ties broken by first encounter. `"N/A"` when the
/// input is empty.
fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter().position(|(v, _)| *v == value) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        match best {
            Some((_, top)) if n <= top => {}
            _ => best = Some((value, n)),
        }
    }
    best.map(|(value, _)| value.to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}
