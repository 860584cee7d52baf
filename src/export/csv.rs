//! CSV report sink.
//!
//! Writes the flat report consumed by the BI dashboards: one header
//! row, one line per record, text fields quoted only when they need it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ForgeResult;
use crate::gen::record::RiskRecord;

use super::RunInfo;

const HEADER: &str = "vendor,region,sector,criticality,country,city,latitude,longitude,\
contact_name,contact_email,risk,cve_id,description,cvss_score,last_contact_date,\
days_since_last_contact,detection_date,detection_delay_days,exposure_confirmed,\
patch_available,inject_complexity,mttr,enriched";

/// Writes the report file into `dir` and returns its path.
///
/// File name: `vendor_risk_<stamp>_<enriched|raw>.csv`.
pub fn write_report(dir: &Path, run: &RunInfo, dataset: &[RiskRecord]) -> ForgeResult<PathBuf> {
    let label = if run.enriched { "enriched" } else { "raw" };
    let path = dir.join(format!("vendor_risk_{}_{}.csv", run.file_stamp(), label));

    let mut w = BufWriter::new(File::create(&path)?);
    writeln!(w, "{HEADER}")?;
    for r in dataset {
        writeln!(
            w,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            escape(&r.vendor),
            escape(&r.region),
            escape(&r.sector),
            r.criticality,
            escape(&r.country),
            escape(&r.city),
            r.latitude,
            r.longitude,
            escape(&r.contact_name),
            escape(&r.contact_email),
            escape(&r.risk),
            escape(&r.cve_id),
            escape(&r.description),
            r.cvss_score,
            r.last_contact_date,
            r.days_since_last_contact,
            r.detection_date,
            r.detection_delay_days,
            escape(&r.exposure_confirmed),
            escape(&r.patch_available),
            escape(&r.inject_complexity),
            escape(&r.mttr),
            r.enriched,
        )?;
    }
    w.flush()?;
    Ok(path)
}

/// Quotes a field when it contains a comma or a quote.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
