//! Derives compliance gaps and remediation roadmaps from control
//! assessment results.

use crate::error::{ComplianceError, Result};
use governance_core::{define_domain_id, Identified, RecordStore, Severity};
use serde::{Deserialize, Serialize};

define_domain_id!(GapId, "gap");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Passed,
    Partial,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub name: String,
    pub status: ControlStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapState {
    Open,
    Remediated,
    Accepted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub id: GapId,
    pub control_name: String,
    pub severity: Severity,
    pub risk_score: f64,
    pub state: GapState,
}

impl Identified<GapId> for Gap {
    fn id(&self) -> GapId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub score: f64,
    pub gaps_created: Vec<GapId>,
}

pub struct ComplianceGapAnalyzer {
    gaps: RecordStore<GapId, Gap>,
}

impl Default for ComplianceGapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceGapAnalyzer {
    pub fn new() -> Self {
        Self { gaps: RecordStore::new() }
    }

    fn risk_score(severity: Severity) -> f64 {
        match severity {
            Severity::Critical => 1.0,
            Severity::High => 0.8,
            Severity::Medium => 0.6,
            Severity::Low => 0.4,
            _ => 0.2,
        }
    }

    pub fn run_assessment(&self, controls: &[Control]) -> AssessmentResult {
        let total = controls.len();
        let passed = controls.iter().filter(|c| c.status == ControlStatus::Passed).count();
        let score = if total == 0 { 100.0 } else { 100.0 * passed as f64 / total as f64 };

        let mut gaps_created = Vec::new();
        for control in controls {
            let severity = match control.status {
                ControlStatus::Passed => continue,
                ControlStatus::Partial => Severity::Medium,
                ControlStatus::Failed => Severity::High,
            };
            let gap = Gap {
                id: GapId::new(),
                control_name: control.name.clone(),
                severity,
                risk_score: Self::risk_score(severity),
                state: GapState::Open,
            };
            gaps_created.push(gap.id);
            self.gaps.insert(gap);
        }

        AssessmentResult { score, gaps_created }
    }

    pub fn remediate(&self, gap_id: GapId) -> Result<Gap> {
        self.gaps.update(gap_id, |g| g.state = GapState::Remediated).ok_or_else(|| ComplianceError::GapNotFound { id: gap_id.to_string() })
    }

    pub fn accept(&self, gap_id: GapId) -> Result<Gap> {
        self.gaps.update(gap_id, |g| g.state = GapState::Accepted).ok_or_else(|| ComplianceError::GapNotFound { id: gap_id.to_string() })
    }

    /// Gaps ordered by descending `risk_score`.
    pub fn roadmap(&self) -> Vec<Gap> {
        let mut gaps = self.gaps.all();
        gaps.sort_by(|a, b| b.risk_score.partial_cmp(&a.risk_score).unwrap());
        gaps
    }

    pub fn roadmap_progress(&self) -> f64 {
        let gaps = self.gaps.all();
        let total = gaps.len();
        if total == 0 {
            return 100.0;
        }
        let done = gaps.iter().filter(|g| g.state == GapState::Remediated || g.state == GapState::Accepted).count();
        100.0 * done as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_controls_create_high_severity_gaps() {
        let analyzer = ComplianceGapAnalyzer::new();
        let controls = vec![Control { name: "encryption at rest".to_string(), status: ControlStatus::Failed }];
        let result = analyzer.run_assessment(&controls);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.gaps_created.len(), 1);
    }

    #[test]
    fn score_is_percentage_passed() {
        let analyzer = ComplianceGapAnalyzer::new();
        let controls = vec![
            Control { name: "a".to_string(), status: ControlStatus::Passed },
            Control { name: "b".to_string(), status: ControlStatus::Passed },
            Control { name: "c".to_string(), status: ControlStatus::Failed },
            Control { name: "d".to_string(), status: ControlStatus::Passed },
        ];
        let result = analyzer.run_assessment(&controls);
        assert_eq!(result.score, 75.0);
    }

    #[test]
    fn roadmap_orders_by_descending_risk() {
        let analyzer = ComplianceGapAnalyzer::new();
        let controls = vec![
            Control { name: "partial-one".to_string(), status: ControlStatus::Partial },
            Control { name: "failed-one".to_string(), status: ControlStatus::Failed },
        ];
        analyzer.run_assessment(&controls);
        let roadmap = analyzer.roadmap();
        assert!(roadmap[0].risk_score >= roadmap[1].risk_score);
    }

    #[test]
    fn progress_accounts_for_remediated_and_accepted() {
        let analyzer = ComplianceGapAnalyzer::new();
        let controls = vec![
            Control { name: "a".to_string(), status: ControlStatus::Failed },
            Control { name: "b".to_string(), status: ControlStatus::Failed },
        ];
        let result = analyzer.run_assessment(&controls);
        analyzer.remediate(result.gaps_created[0]).unwrap();
        assert_eq!(analyzer.roadmap_progress(), 50.0);
    }
}
