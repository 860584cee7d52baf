//! Configuration module

use std::env;
use std::path::PathBuf;

/// Paths the generator reads from and writes to.
///
/// Loaded from `RISKFORGE_*` environment variables with repo-layout
/// defaults; individual fields may be overridden by CLI flags.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// Vendor reference pool (CSV)
    pub vendor_pool: PathBuf,

    /// Risk scenario template pool (CSV)
    pub scenario_pool: PathBuf,

    /// Vulnerability pool (CSV)
    pub vuln_pool: PathBuf,

    /// Directory the report CSV is written into
    pub csv_dir: PathBuf,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Directory the JSON feed file is written into
    pub feed_dir: PathBuf,
}

impl ForgeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            vendor_pool: env::var("RISKFORGE_VENDOR_POOL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/vendors.csv")),

            scenario_pool: env::var("RISKFORGE_SCENARIO_POOL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/scenario_templates.csv")),

            vuln_pool: env::var("RISKFORGE_VULN_POOL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/vuln_pool.csv")),

            csv_dir: env::var("RISKFORGE_CSV_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            db_path: env::var("RISKFORGE_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("vendor_risk.db")),

            feed_dir: env::var("RISKFORGE_FEED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
