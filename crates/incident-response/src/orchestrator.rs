//! Wires the incident-response evaluators together and exposes the
//! `respond_to_incident` fan-out.

use crate::containment::{AutoContainment, ContainmentAction};
use crate::error::Result;
use crate::forensic_collector::ForensicCollector;
use crate::impact_assessor::{severity_to_impact, ImpactAssessment, IncidentImpactAssessor};
use crate::incident_detector::{Incident, IncidentDetector, IncidentStatus, IncidentType};
use crate::lesson_learner::IncidentLessonLearner;
use crate::playbook_generator::PlaybookGenerator;
use crate::recovery_executor::RecoveryExecutor;
use crate::root_cause_analyzer::{Analysis, IncidentRootCauseAnalyzer};
use governance_core::{Clock, Severity, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub stats: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentResponseResult {
    pub incident: Incident,
    pub containment_ids: Vec<crate::containment::ContainmentId>,
    pub impact_assessment: ImpactAssessment,
    pub analysis: Analysis,
}

pub struct IncidentOrchestrator {
    pub detector: IncidentDetector,
    pub containment: AutoContainment,
    pub forensic_collector: ForensicCollector,
    pub root_cause: IncidentRootCauseAnalyzer,
    pub impact: IncidentImpactAssessor,
    pub recovery: RecoveryExecutor,
    pub lesson_learner: IncidentLessonLearner,
    pub playbook_generator: PlaybookGenerator,
}

impl IncidentOrchestrator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            detector: IncidentDetector::new(clock.clone()),
            containment: AutoContainment::new(clock.clone()),
            forensic_collector: ForensicCollector::new(clock.clone()),
            root_cause: IncidentRootCauseAnalyzer::new(clock.clone()),
            impact: IncidentImpactAssessor::new(),
            recovery: RecoveryExecutor::new(clock),
            lesson_learner: IncidentLessonLearner::new(),
            playbook_generator: PlaybookGenerator::new(),
        }
    }

    /// 1. Detect the incident.
    /// 2. If `auto_contain_actions` is non-empty, contain across the
    ///    affected systems and mark the incident `contained`.
    /// 3. Assess impact using `severity_to_impact(severity)`.
    /// 4. Start root-cause analysis.
    /// 5. Move status to `investigating`.
    pub fn respond_to_incident(
        &self,
        incident_type: IncidentType,
        severity: Severity,
        indicators: HashSet<String>,
        affected_systems: HashSet<String>,
        auto_contain_actions: &[ContainmentAction],
        affected_categories: Vec<String>,
        affected_users: u64,
        financial_exposure: f64,
    ) -> Result<IncidentResponseResult> {
        let incident = self.detector.detect_incident(incident_type, severity, indicators, affected_systems.clone())?;

        let mut containment_ids = Vec::new();
        if !auto_contain_actions.is_empty() {
            let targets: Vec<String> = affected_systems.into_iter().collect();
            containment_ids = self.containment.contain_incident(incident.id, auto_contain_actions, &targets);
            self.detector.update_status(incident.id, IncidentStatus::Contained)?;
        }

        let impact_assessment = self.impact.assess_impact(
            incident.id,
            severity_to_impact(severity),
            affected_categories,
            affected_users,
            financial_exposure,
        );

        let analysis = self.root_cause.start_analysis(incident.id);

        let incident = self.detector.update_status(incident.id, IncidentStatus::Investigating)?;

        Ok(IncidentResponseResult { incident, containment_ids, impact_assessment, analysis })
    }

    pub fn get_summary(&self) -> IncidentSummary {
        let mut stats = HashMap::new();
        stats.insert("shutdown_count".to_string(), self.containment.shutdown_count());
        IncidentSummary { stats }
    }
}

impl Default for IncidentOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario S5: a critical malware incident with network isolation
    /// reaches `investigating` with at least one active quarantine.
    #[test]
    fn s5_respond_to_incident_with_containment_reaches_investigating() {
        let orchestrator = IncidentOrchestrator::default();
        let result = orchestrator
            .respond_to_incident(
                IncidentType::Malware,
                Severity::Critical,
                ["c2_beacon".to_string()].into_iter().collect(),
                ["host-1".to_string()].into_iter().collect(),
                &[ContainmentAction::NetworkIsolate],
                vec!["financial".to_string()],
                15_000,
                250_000.0,
            )
            .unwrap();
        assert_eq!(result.incident.status, IncidentStatus::Investigating);
        assert_eq!(result.containment_ids.len(), 1);
        assert!(orchestrator.containment.quarantines_for(result.incident.id).len() >= 1);
        assert!(result.impact_assessment.impact_score > 1.0 - 1e-9);
    }

    #[test]
    fn respond_to_incident_without_containment_skips_contained_status() {
        let orchestrator = IncidentOrchestrator::default();
        let result = orchestrator
            .respond_to_incident(
                IncidentType::Phishing,
                Severity::Low,
                HashSet::new(),
                ["mail-srv".to_string()].into_iter().collect(),
                &[],
                vec![],
                0,
                0.0,
            )
            .unwrap();
        assert_eq!(result.incident.status, IncidentStatus::Investigating);
        assert!(result.containment_ids.is_empty());
    }
}
