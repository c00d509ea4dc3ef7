// Run timing

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Execution metrics
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionMetrics {
    pub total_duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self {
            total_duration_ms: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }
}

impl ExecutionMetrics {
    /// Stamp the end of the run and derive its duration
    pub fn finish(&mut self) {
        let now = Utc::now();
        self.total_duration_ms = (now - self.started_at).num_milliseconds().max(0) as u64;
        self.finished_at = Some(now);
    }
}
