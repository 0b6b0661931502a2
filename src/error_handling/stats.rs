//! Processing statistics tracking.
//!
//! Counts per-row failures by category during a batch run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureType;

/// Per-category failure counters.
///
/// Every `FailureType` is initialized to zero on creation, so increments and
/// lookups never miss.
pub struct ProcessingStats {
    failures: HashMap<FailureType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for failure in FailureType::iter() {
            failures.insert(failure, AtomicUsize::new(0));
        }
        ProcessingStats { failures }
    }

    pub fn increment_failure(&self, failure: FailureType) {
        if let Some(counter) = self.failures.get(&failure) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map",
                failure
            );
        }
    }

    pub fn get_failure_count(&self, failure: FailureType) -> usize {
        self.failures
            .get(&failure)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total failure count across all categories.
    pub fn total_failures(&self) -> usize {
        FailureType::iter()
            .map(|f| self.get_failure_count(f))
            .sum()
    }

    /// Logs every non-zero counter, one line per category.
    pub fn log_summary(&self) {
        if self.total_failures() == 0 {
            return;
        }
        log::info!("Failure counts:");
        for failure in FailureType::iter() {
            let count = self.get_failure_count(failure);
            if count > 0 {
                log::info!("   {}: {}", failure, count);
            }
        }
    }
}
