//! SQLite sink.
//!
//! Appends each run's dataset to `cve_records` and records run
//! provenance in `runs`, all inside one transaction.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::ForgeResult;
use crate::gen::record::RiskRecord;

use super::RunInfo;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS runs (
    run_id       TEXT PRIMARY KEY,
    seed         INTEGER,
    record_count INTEGER NOT NULL,
    enriched     INTEGER NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cve_records (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id                  TEXT NOT NULL,
    vendor                  TEXT NOT NULL,
    region                  TEXT NOT NULL,
    sector                  TEXT NOT NULL,
    criticality             TEXT NOT NULL,
    country                 TEXT NOT NULL,
    city                    TEXT NOT NULL,
    latitude                REAL NOT NULL,
    longitude               REAL NOT NULL,
    contact_name            TEXT NOT NULL,
    contact_email           TEXT NOT NULL,
    risk                    TEXT NOT NULL,
    cve_id                  TEXT NOT NULL,
    description             TEXT NOT NULL,
    cvss_score              REAL NOT NULL,
    last_contact_date       TEXT NOT NULL,
    days_since_last_contact INTEGER NOT NULL,
    detection_date          TEXT NOT NULL,
    detection_delay_days    INTEGER NOT NULL,
    exposure_confirmed      TEXT NOT NULL,
    patch_available         TEXT NOT NULL,
    inject_complexity       TEXT NOT NULL,
    mttr                    TEXT NOT NULL,
    enriched                INTEGER NOT NULL
);
";

const INSERT_RECORD_SQL: &str = "
INSERT INTO cve_records (
    run_id, vendor, region, sector, criticality, country, city,
    latitude, longitude, contact_name, contact_email, risk, cve_id,
    description, cvss_score, last_contact_date, days_since_last_contact,
    detection_date, detection_delay_days, exposure_confirmed,
    patch_available, inject_complexity, mttr, enriched
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
          ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)";

pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Opens (creating if needed) the database file and ensures the schema.
    pub fn open(path: &Path) -> ForgeResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// In-memory database with the same schema.
    #[cfg(test)]
    pub fn in_memory() -> ForgeResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Stores one run: provenance row plus the full dataset, appended.
    ///
    /// Returns the number of records written.
    pub fn store(&mut self, run: &RunInfo, dataset: &[RiskRecord]) -> ForgeResult<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO runs (run_id, seed, record_count, enriched, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                run.run_id.to_string(),
                run.seed.map(|s| s as i64),
                run.count as i64,
                run.enriched,
                run.started_at.to_rfc3339(),
            ],
        )?;

        {
            let mut stmt = tx.prepare(INSERT_RECORD_SQL)?;
            for r in dataset {
                stmt.execute(params![
                    run.run_id.to_string(),
                    r.vendor,
                    r.region,
                    r.sector,
                    r.criticality.as_str(),
                    r.country,
                    r.city,
                    r.latitude,
                    r.longitude,
                    r.contact_name,
                    r.contact_email,
                    r.risk,
                    r.cve_id,
                    r.description,
                    r.cvss_score,
                    r.last_contact_date,
                    r.days_since_last_contact,
                    r.detection_date,
                    r.detection_delay_days,
                    r.exposure_confirmed,
                    r.patch_available,
                    r.inject_complexity,
                    r.mttr,
                    r.enriched,
                ])?;
            }
        }

        tx.commit()?;
        Ok(dataset.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
