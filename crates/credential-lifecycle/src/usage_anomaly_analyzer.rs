//! Tracks a rolling window of per-key usage events and flags bursts of
//! distinct source IPs and impossible-travel pairs.

use crate::key_inventory::KeyId;
use governance_core::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const MAX_WINDOW: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub success: bool,
    pub source_ip: String,
    pub request_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub error_rate: f64,
    pub idle_days: i64,
    pub critical_anomalies: u64,
    pub non_critical_anomalies: u64,
}

pub struct UsageAnomalyAnalyzer {
    windows: RwLock<HashMap<KeyId, Vec<UsageEvent>>>,
    clock: Arc<dyn Clock>,
    burst_threshold: usize,
}

impl UsageAnomalyAnalyzer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { windows: RwLock::new(HashMap::new()), clock, burst_threshold: 10 }
    }

    pub fn record_usage(&self, key_id: KeyId, event: UsageEvent) {
        let mut windows = self.windows.write().unwrap();
        let window = windows.entry(key_id).or_default();
        window.push(event);
        if window.len() > MAX_WINDOW {
            let excess = window.len() - MAX_WINDOW;
            window.drain(0..excess);
        }
    }

    pub fn analyze(&self, key_id: KeyId) -> AnomalyReport {
        let windows = self.windows.read().unwrap();
        let Some(events) = windows.get(&key_id) else {
            return AnomalyReport { error_rate: 0.0, idle_days: 0, critical_anomalies: 0, non_critical_anomalies: 0 };
        };
        if events.is_empty() {
            return AnomalyReport { error_rate: 0.0, idle_days: 0, critical_anomalies: 0, non_critical_anomalies: 0 };
        }

        let total = events.len() as f64;
        let failures = events.iter().filter(|e| !e.success).count() as f64;
        let error_rate = failures / total;

        let most_recent = events.iter().map(|e| e.timestamp).max().unwrap();
        let idle_days = (self.clock.now() - most_recent).num_days().max(0);

        let now = self.clock.now();
        let last_24h: Vec<&UsageEvent> = events.iter().filter(|e| (now - e.timestamp).num_hours() <= 24).collect();
        let distinct_prefixes: std::collections::HashSet<String> = last_24h.iter().map(|e| ip_slash_16(&e.source_ip)).collect();
        let burst_count = distinct_prefixes.len();

        let impossible_travel = has_impossible_travel(events);

        let critical_anomalies = if burst_count >= self.burst_threshold || impossible_travel { 1 } else { 0 };
        let non_critical_anomalies =
            if critical_anomalies == 0 && burst_count >= self.burst_threshold / 2 { 1 } else { 0 };

        AnomalyReport { error_rate, idle_days, critical_anomalies, non_critical_anomalies }
    }
}

fn ip_slash_16(ip: &str) -> String {
    let parts: Vec<&str> = ip.splitn(3, '.').collect();
    if parts.len() >= 2 {
        format!("{}.{}", parts[0], parts[1])
    } else {
        ip.to_string()
    }
}

fn has_impossible_travel(events: &[UsageEvent]) -> bool {
    for i in 0..events.len() {
        for j in (i + 1)..events.len() {
            let a = &events[i];
            let b = &events[j];
            let delta = (a.timestamp - b.timestamp).num_minutes().abs();
            if delta < 5 && ip_slash_16(&a.source_ip) != ip_slash_16(&b.source_ip) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::FixedClock;

    fn event(clock: &FixedClock, success: bool, ip: &str) -> UsageEvent {
        UsageEvent { timestamp: clock.now(), success, source_ip: ip.to_string(), request_count: 1 }
    }

    #[test]
    fn no_events_reports_zero_anomalies() {
        let clock = Arc::new(FixedClock::new(chrono::Utc::now()));
        let analyzer = UsageAnomalyAnalyzer::new(clock);
        let report = analyzer.analyze(KeyId::new());
        assert_eq!(report.critical_anomalies, 0);
    }

    #[test]
    fn burst_of_distinct_prefixes_is_critical() {
        let clock = Arc::new(FixedClock::new(chrono::Utc::now()));
        let analyzer = UsageAnomalyAnalyzer::new(clock.clone());
        let key_id = KeyId::new();
        for i in 0..12 {
            analyzer.record_usage(key_id, event(&clock, true, &format!("10.{i}.0.1")));
        }
        let report = analyzer.analyze(key_id);
        assert_eq!(report.critical_anomalies, 1);
    }

    #[test]
    fn impossible_travel_flags_critical() {
        let clock = Arc::new(FixedClock::new(chrono::Utc::now()));
        let analyzer = UsageAnomalyAnalyzer::new(clock.clone());
        let key_id = KeyId::new();
        analyzer.record_usage(key_id, event(&clock, true, "10.0.0.1"));
        clock.advance(chrono::Duration::minutes(1));
        analyzer.record_usage(key_id, event(&clock, true, "192.168.0.1"));
        let report = analyzer.analyze(key_id);
        assert_eq!(report.critical_anomalies, 1);
    }

    #[test]
    fn window_is_bounded_to_500_events() {
        let clock = Arc::new(FixedClock::new(chrono::Utc::now()));
        let analyzer = UsageAnomalyAnalyzer::new(clock.clone());
        let key_id = KeyId::new();
        for _ in 0..600 {
            analyzer.record_usage(key_id, event(&clock, true, "10.0.0.1"));
        }
        assert_eq!(analyzer.windows.read().unwrap().get(&key_id).unwrap().len(), 500);
    }
}
