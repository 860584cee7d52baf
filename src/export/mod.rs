//! Sink adapters for the generated dataset.
//!
//! Every sink receives the dataset, the trend summary and the run
//! metadata explicitly; none of them reads ambient state. Sinks are
//! independent, so one failing never blocks another.

pub mod csv;
pub mod feed;
pub mod sqlite;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity and parameters of one generator invocation.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub seed: Option<u64>,
    pub count: usize,
    pub enriched: bool,
    pub started_at: DateTime<Utc>,
}

impl RunInfo {
    pub fn new(seed: Option<u64>, count: usize, enriched: bool, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seed,
            count,
            enriched,
            started_at,
        }
    }

    /// Timestamp fragment shared by all output file names.
    pub fn file_stamp(&self) -> String {
        self.started_at.format("%Y-%m-%d_%H%M").to_string()
    }
}
