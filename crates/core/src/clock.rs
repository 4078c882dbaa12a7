//! Injected clock, so evaluator tests can assert ordering and bounds
//! without sleeping (per the design notes' "timestamp generation as a
//! side effect" redesign).

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that starts at a fixed instant and advances only when told to.
/// Two records created back-to-back without an explicit `advance` share
/// the same timestamp, matching the "timestamps are monotonic only to
/// wall-clock resolution" guarantee in the concurrency model.
#[derive(Debug)]
pub struct FixedClock {
    micros: AtomicI64,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            micros: AtomicI64::new(start.timestamp_micros()),
        }
    }

    pub fn advance(&self, duration: chrono::Duration) {
        self.micros
            .fetch_add(duration.num_microseconds().unwrap_or(0), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.micros.load(Ordering::SeqCst)).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_only_moves_on_advance() {
        let clock = FixedClock::new(Utc::now());
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first, second);
        clock.advance(chrono::Duration::days(1));
        assert!(clock.now() > first);
    }
}
