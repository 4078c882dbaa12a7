//! Tracks per-observation outcomes for protected attribute/value pairs
//! and flags disparate or differential treatment.

use governance_core::{Clock, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub protected_attr: String,
    pub protected_value: String,
    pub favorable: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisparityAlert {
    pub protected_attr: String,
    pub gap: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifferentialTreatmentFlag {
    pub group_key: String,
    pub unfavorable_rate: f64,
}

pub struct ProtectedClassMonitor {
    observations: RwLock<Vec<Observation>>,
    clock: Arc<dyn Clock>,
    disparity_threshold: f64,
}

impl ProtectedClassMonitor {
    pub fn new(clock: Arc<dyn Clock>, disparity_threshold: f64) -> Self {
        Self { observations: RwLock::new(Vec::new()), clock, disparity_threshold }
    }

    pub fn record_observation(&self, protected_attr: impl Into<String>, protected_value: impl Into<String>, favorable: bool) {
        let observation = Observation {
            protected_attr: protected_attr.into(),
            protected_value: protected_value.into(),
            favorable,
            created_at: self.clock.now(),
        };
        self.observations.write().unwrap().push(observation);
    }

    pub fn check_disparity(&self, protected_attr: &str, tail_n: usize) -> Option<DisparityAlert> {
        let observations = self.observations.read().unwrap();
        let relevant: Vec<&Observation> = observations.iter().filter(|o| o.protected_attr == protected_attr).collect();
        let start = relevant.len().saturating_sub(tail_n);
        let tail = &relevant[start..];

        let mut groups: HashMap<&str, (u64, u64)> = HashMap::new();
        for o in tail {
            let entry = groups.entry(o.protected_value.as_str()).or_insert((0, 0));
            entry.1 += 1;
            if o.favorable {
                entry.0 += 1;
            }
        }
        if groups.len() < 2 {
            return None;
        }
        let rates: Vec<f64> = groups.values().map(|(pos, total)| *pos as f64 / *total as f64).collect();
        let max = rates.iter().cloned().fold(f64::MIN, f64::max);
        let min = rates.iter().cloned().fold(f64::MAX, f64::min);
        let gap = max - min;

        if gap > self.disparity_threshold {
            let severity = if gap > 0.5 { Severity::Critical } else { Severity::High };
            Some(DisparityAlert { protected_attr: protected_attr.to_string(), gap, severity })
        } else {
            None
        }
    }

    pub fn check_differential_treatment(&self) -> Vec<DifferentialTreatmentFlag> {
        let observations = self.observations.read().unwrap();
        let mut groups: HashMap<String, (u64, u64)> = HashMap::new();
        for o in observations.iter() {
            let key = format!("{}={}", o.protected_attr, o.protected_value);
            let entry = groups.entry(key).or_insert((0, 0));
            entry.1 += 1;
            if !o.favorable {
                entry.0 += 1;
            }
        }
        groups
            .into_iter()
            .filter_map(|(group_key, (unfavorable, total))| {
                let rate = unfavorable as f64 / total as f64;
                if rate > 0.3 {
                    Some(DifferentialTreatmentFlag { group_key, unfavorable_rate: rate })
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn monitor() -> ProtectedClassMonitor {
        ProtectedClassMonitor::new(Arc::new(SystemClock), 0.2)
    }

    #[test]
    fn disparity_below_threshold_is_none() {
        let monitor = monitor();
        for _ in 0..10 {
            monitor.record_observation("age", "under_40", true);
        }
        for _ in 0..10 {
            monitor.record_observation("age", "over_40", true);
        }
        assert!(monitor.check_disparity("age", 20).is_none());
    }

    #[test]
    fn large_gap_is_critical() {
        let monitor = monitor();
        for _ in 0..10 {
            monitor.record_observation("age", "under_40", true);
        }
        for _ in 0..10 {
            monitor.record_observation("age", "over_40", false);
        }
        let alert = monitor.check_disparity("age", 20).unwrap();
        assert_eq!(alert.severity, Severity::Critical);
    }

    #[test]
    fn differential_treatment_flags_high_unfavorable_rate() {
        let monitor = monitor();
        for _ in 0..4 {
            monitor.record_observation("age", "over_40", false);
        }
        for _ in 0..6 {
            monitor.record_observation("age", "over_40", true);
        }
        let flags = monitor.check_differential_treatment();
        assert_eq!(flags.len(), 1);
    }
}
