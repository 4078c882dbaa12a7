//! Pattern-based incident detection and cross-incident correlation.

use crate::error::{IncidentError, Result};
use governance_core::{define_domain_id, Clock, Identified, RecordStore, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::warn;

define_domain_id!(IncidentId, "inc");
define_domain_id!(PatternId, "ipat");
define_domain_id!(IncidentAlertId, "ialert");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Malware,
    DataBreach,
    UnauthorizedAccess,
    DenialOfService,
    Phishing,
    InsiderThreat,
    SystemCompromise,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Active,
    Contained,
    Investigating,
    Recovering,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    pub indicators: HashSet<String>,
    pub threshold: usize,
    pub severity: Severity,
    pub match_count: u64,
}

impl Identified<PatternId> for Pattern {
    fn id(&self) -> PatternId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub indicators: HashSet<String>,
    pub affected_systems: HashSet<String>,
    pub matched_patterns: Vec<PatternId>,
    pub status: IncidentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<IncidentId> for Incident {
    fn id(&self) -> IncidentId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentAlert {
    pub id: IncidentAlertId,
    pub incident_id: IncidentId,
    pub severity: Severity,
}

impl Identified<IncidentAlertId> for IncidentAlert {
    fn id(&self) -> IncidentAlertId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correlation {
    pub incident_ids: Vec<IncidentId>,
    pub common_indicators: HashSet<String>,
    pub common_affected_systems: HashSet<String>,
    pub strength: f64,
}

pub struct IncidentDetector {
    patterns: RecordStore<PatternId, Pattern>,
    incidents: RecordStore<IncidentId, Incident>,
    alerts: RecordStore<IncidentAlertId, IncidentAlert>,
    clock: Arc<dyn Clock>,
    match_counters: RwLock<std::collections::HashMap<PatternId, Arc<AtomicU64>>>,
}

impl IncidentDetector {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            patterns: RecordStore::new(),
            incidents: RecordStore::new(),
            alerts: RecordStore::new(),
            clock,
            match_counters: RwLock::new(std::collections::HashMap::new()),
        }
    }

    pub fn register_pattern(&self, indicators: HashSet<String>, threshold: usize, severity: Severity) -> PatternId {
        let pattern = Pattern { id: PatternId::new(), indicators, threshold, severity, match_count: 0 };
        let id = pattern.id;
        self.patterns.insert(pattern);
        self.match_counters.write().unwrap().insert(id, Arc::new(AtomicU64::new(0)));
        id
    }

    pub fn detect_incident(
        &self,
        incident_type: IncidentType,
        severity: Severity,
        observed_indicators: HashSet<String>,
        affected_systems: HashSet<String>,
    ) -> Result<Incident> {
        let mut matched_patterns = Vec::new();
        for pattern in self.patterns.all() {
            let overlap = pattern.indicators.intersection(&observed_indicators).count();
            if overlap >= pattern.threshold {
                matched_patterns.push(pattern.id);
                if let Some(counter) = self.match_counters.read().unwrap().get(&pattern.id) {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let new_count = counter.load(Ordering::SeqCst);
                    self.patterns.update(pattern.id, |p| p.match_count = new_count);
                }
            }
        }

        let incident = Incident {
            id: IncidentId::new(),
            incident_type,
            severity,
            indicators: observed_indicators,
            affected_systems,
            matched_patterns,
            status: IncidentStatus::Active,
            created_at: self.clock.now(),
        };
        let incident_id = incident.id;
        self.incidents.insert(incident.clone());
        warn!(incident_id = %incident_id, ?severity, "incident detected");
        self.alerts.insert(IncidentAlert { id: IncidentAlertId::new(), incident_id, severity });
        Ok(incident)
    }

    pub fn update_status(&self, incident_id: IncidentId, status: IncidentStatus) -> Result<Incident> {
        self.incidents.update(incident_id, |i| i.status = status).ok_or_else(|| IncidentError::IncidentNotFound { id: incident_id.to_string() })
    }

    pub fn get_incident(&self, incident_id: IncidentId) -> Result<Incident> {
        self.incidents.get(incident_id).ok_or_else(|| IncidentError::IncidentNotFound { id: incident_id.to_string() })
    }

    pub fn correlate_incidents(&self, incident_ids: &[IncidentId]) -> Result<Correlation> {
        if incident_ids.len() < 2 {
            return Err(IncidentError::InsufficientIncidentsForCorrelation);
        }
        let incidents: Vec<Incident> =
            incident_ids.iter().map(|id| self.get_incident(*id)).collect::<Result<Vec<_>>>()?;

        let mut common_indicators = incidents[0].indicators.clone();
        let mut common_affected_systems = incidents[0].affected_systems.clone();
        let mut max_any_indicators = incidents[0].indicators.len();

        for incident in &incidents[1..] {
            common_indicators = common_indicators.intersection(&incident.indicators).cloned().collect();
            common_affected_systems = common_affected_systems.intersection(&incident.affected_systems).cloned().collect();
            max_any_indicators = max_any_indicators.max(incident.indicators.len());
        }

        let strength = common_indicators.len() as f64 / max_any_indicators.max(1) as f64;

        Ok(Correlation { incident_ids: incident_ids.to_vec(), common_indicators, common_affected_systems, strength })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn detector() -> IncidentDetector {
        IncidentDetector::new(Arc::new(SystemClock))
    }

    fn indicators(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pattern_matches_when_overlap_meets_threshold() {
        let detector = detector();
        detector.register_pattern(indicators(&["ransom_note", "encrypted_files", "c2_beacon"]), 2, Severity::Critical);
        let incident = detector
            .detect_incident(IncidentType::Malware, Severity::Critical, indicators(&["ransom_note", "encrypted_files"]), indicators(&["srv1"]))
            .unwrap();
        assert_eq!(incident.matched_patterns.len(), 1);
    }

    #[test]
    fn status_transitions_accept_any_target() {
        let detector = detector();
        let incident = detector.detect_incident(IncidentType::Malware, Severity::High, indicators(&[]), indicators(&["srv1"])).unwrap();
        let updated = detector.update_status(incident.id, IncidentStatus::Closed).unwrap();
        assert_eq!(updated.status, IncidentStatus::Closed);
    }

    #[test]
    fn correlation_requires_at_least_two_incidents() {
        let detector = detector();
        let incident = detector.detect_incident(IncidentType::Malware, Severity::High, indicators(&[]), indicators(&["srv1"])).unwrap();
        assert!(detector.correlate_incidents(&[incident.id]).is_err());
    }

    #[test]
    fn correlation_computes_common_indicators_and_strength() {
        let detector = detector();
        let a = detector
            .detect_incident(IncidentType::Malware, Severity::High, indicators(&["beacon", "exfil"]), indicators(&["srv1"]))
            .unwrap();
        let b = detector
            .detect_incident(IncidentType::Malware, Severity::High, indicators(&["beacon"]), indicators(&["srv1", "srv2"]))
            .unwrap();
        let correlation = detector.correlate_incidents(&[a.id, b.id]).unwrap();
        assert_eq!(correlation.common_indicators.len(), 1);
        assert_eq!(correlation.strength, 0.5);
    }
}
