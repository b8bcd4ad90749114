//! Statistics collected over a catalog run

use crate::extraction::engine::ExtractionTally;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters for one run over a feed directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// `.json` files discovered in the source directory
    pub files_found: usize,
    /// Files that parsed and were walked
    pub files_processed: usize,
    /// Files skipped for bad content or shape
    pub files_skipped: usize,
    /// Part entries that produced or extended a record
    pub parts_accepted: usize,
    /// Part entries dropped for missing fields
    pub parts_skipped: usize,
    /// Distinct product numbers in the catalog
    pub distinct_products: usize,
    /// Category lines emitted across all items
    pub category_lines: usize,
    /// True when the test-mode cap ended the run early
    pub stopped_at_cap: bool,
    /// Wall-clock time for the whole run
    pub processing_time_ms: u64,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self {
            files_found: 0,
            files_processed: 0,
            files_skipped: 0,
            parts_accepted: 0,
            parts_skipped: 0,
            distinct_products: 0,
            category_lines: 0,
            stopped_at_cap: false,
            processing_time_ms: 0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl RunStatistics {
    pub fn new(files_found: usize) -> Self {
        Self {
            files_found,
            ..Default::default()
        }
    }

    pub fn record_tally(&mut self, tally: &ExtractionTally) {
        self.parts_accepted = tally.accepted();
        self.parts_skipped = tally.skipped;
    }

    pub fn finish(&mut self, distinct_products: usize, category_lines: usize, elapsed: Duration) {
        self.distinct_products = distinct_products;
        self.category_lines = category_lines;
        self.processing_time_ms = elapsed.as_millis() as u64;
        self.collected_at = chrono::Utc::now();
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Processed {} of {} files ({} skipped) in {:.1}s - {} products, {} category lines, {} part entries skipped",
            self.files_processed,
            self.files_found,
            self.files_skipped,
            self.processing_time_ms as f32 / 1000.0,
            self.distinct_products,
            self.category_lines,
            self.parts_skipped
        );
        if self.stopped_at_cap {
            summary.push_str(" (stopped at test-mode cap)");
        }
        summary
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
