//! Run log record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub guests_fetched: usize,
    pub hosts_fetched: usize,
    pub experiments_fetched: usize,
    pub single_component_rows: usize,
    pub binary_mixture_rows: usize,
    #[serde(default)]
    pub excluded_experiments: usize,
    #[serde(default)]
    pub malformed_experiments: usize,
    #[serde(default)]
    pub guest_rows: usize,
}

impl RunRecord {
    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
