use super::{Error, ErrorCategory, ErrorSeverity};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Error counters for monitoring, keyed by category and severity.
///
/// Orchestrators hold one of these and call [`record_error`](ErrorMetrics::record_error)
/// whenever an evaluator call returns `Err`, so `get_summary()` reporting can
/// surface failure counts alongside success counts.
#[derive(Debug, Default)]
pub struct ErrorMetrics {
    error_counts: RwLock<HashMap<ErrorCategory, AtomicU64>>,
    severity_counts: RwLock<HashMap<ErrorSeverity, AtomicU64>>,
}

impl ErrorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&self, error: &Error) {
        {
            let counts = self.error_counts.read().unwrap();
            if let Some(counter) = counts.get(&error.category()) {
                counter.fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
        let mut counts = self.error_counts.write().unwrap();
        counts
            .entry(error.category())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);

        let mut sev = self.severity_counts.write().unwrap();
        sev.entry(error.severity)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_errors(&self) -> u64 {
        self.error_counts
            .read()
            .unwrap()
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    pub fn count_for_category(&self, category: ErrorCategory) -> u64 {
        self.error_counts
            .read()
            .unwrap()
            .get(&category)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}
