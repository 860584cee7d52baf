//! JSON feed sink.
//!
//! Drops one pretty-printed document per run into the ingestion spool
//! directory: run identity, the full record list and the trend summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ForgeResult;
use crate::gen::record::RiskRecord;
use crate::gen::trend::TrendSummary;

use super::RunInfo;

#[derive(Serialize)]
struct FeedDocument<'a> {
    run_id: String,
    generated_at: String,
    cve_records: &'a [RiskRecord],
    trend_summary: &'a TrendSummary,
}

/// Writes the feed file into `dir` and returns its path.
///
/// File name: `log_cve_data_<stamp>.json`.
pub fn write_feed(
    dir: &Path,
    run: &RunInfo,
    dataset: &[RiskRecord],
    trend: &TrendSummary,
) -> ForgeResult<PathBuf> {
    let path = dir.join(format!("log_cve_data_{}.json", run.file_stamp()));
    let doc = FeedDocument {
        run_id: run.run_id.to_string(),
        generated_at: run.started_at.to_rfc3339(),
        cve_records: dataset,
        trend_summary: trend,
    };

    let mut w = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut w, &doc)?;
    w.flush()?;
    Ok(path)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::synth::synthesize;
    use crate::gen::trend::aggregate;
    use crate::pool::PoolSet;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    #[test]
    fn test_feed_document_round_trips_as_json() {
        let pools = PoolSet::builtin().unwrap();
        let now = Utc.with_ymd_and_hms(2031, 5, 14, 9, 30, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(14);
        let dataset = synthesize(&pools, 20, true, &mut rng, now).unwrap();
        let trend = aggregate(&dataset, now);
        let run = RunInfo::new(Some(14), 20, true, now);

        let dir = TempDir::new().unwrap();
        let path = write_feed(dir.path(), &run, &dataset, &trend).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "log_cve_data_2031-05-14_0930.json"
        );

        let body = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(doc["run_id"], run.run_id.to_string());
        assert_eq!(doc["cve_records"].as_array().unwrap().len(), 20);
        assert_eq!(doc["trend_summary"]["timestamp"], "2031-05-14 09:30");
        // Wire names for the counts stay as the pipeline expects them.
        assert!(doc["trend_summary"]["dirty_ratio"].is_u64());
        assert!(doc["trend_summary"]["clean_ratio"].is_u64());
        assert!(doc["trend_summary"].get("dirty_count").is_none());

        let first = &doc["cve_records"][0];
        assert!(first["vendor"].is_string());
        assert!(first["criticality"]
            .as_str()
            .unwrap()
            .starts_with("Tier "));
        assert_eq!(first["enriched"], true);
    }
}
