//! Append-only log of AI-assisted decisions, audited for outcome
//! disparity and low-confidence patterns.

use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

define_domain_id!(DecisionId, "edec");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub group: Option<String>,
    pub outcome: bool,
    pub confidence: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<DecisionId> for Decision {
    fn id(&self) -> DecisionId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditFindingType {
    OutcomeDisparity,
    LowConfidencePattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLevel {
    Minor,
    Major,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditFinding {
    pub finding_type: AuditFindingType,
    pub issue_level: IssueLevel,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    MinorIssue,
    NonCompliant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub findings: Vec<AuditFinding>,
    pub compliance: ComplianceStatus,
    pub reviewed: usize,
}

pub struct EthicsDecisionAuditor {
    decisions: RecordStore<DecisionId, Decision>,
    retention_limit: usize,
    clock: Arc<dyn Clock>,
}

impl EthicsDecisionAuditor {
    pub fn new(clock: Arc<dyn Clock>, retention_limit: usize) -> Self {
        Self { decisions: RecordStore::new(), retention_limit, clock }
    }

    pub fn record_decision(&self, group: Option<String>, outcome: bool, confidence: f64) -> DecisionId {
        let decision = Decision { id: DecisionId::new(), group, outcome, confidence, created_at: self.clock.now() };
        let id = decision.id;
        self.decisions.insert(decision);
        self.decisions.truncate_front(self.retention_limit);
        id
    }

    pub fn audit(&self, tail_n: usize) -> AuditResult {
        let reviewed_records = self.decisions.tail(tail_n);
        let reviewed = reviewed_records.len();
        let mut findings = Vec::new();

        let grouped: HashMap<String, (u64, u64)> = reviewed_records.iter().filter_map(|d| d.group.clone().map(|g| (g, d))).fold(
            HashMap::new(),
            |mut acc, (group, decision)| {
                let entry = acc.entry(group).or_insert((0, 0));
                entry.1 += 1;
                if decision.outcome {
                    entry.0 += 1;
                }
                acc
            },
        );

        if grouped.len() >= 2 {
            let rates: Vec<f64> = grouped.values().map(|(pos, total)| *pos as f64 / *total as f64).collect();
            let max = rates.iter().cloned().fold(f64::MIN, f64::max);
            let min = rates.iter().cloned().fold(f64::MAX, f64::min);
            let gap = max - min;
            if gap > 0.4 {
                findings.push(AuditFinding {
                    finding_type: AuditFindingType::OutcomeDisparity,
                    issue_level: IssueLevel::Major,
                    detail: format!("outcome gap {gap:.2} across groups"),
                });
            } else if gap > 0.2 {
                findings.push(AuditFinding {
                    finding_type: AuditFindingType::OutcomeDisparity,
                    issue_level: IssueLevel::Minor,
                    detail: format!("outcome gap {gap:.2} across groups"),
                });
            }
        }

        if reviewed > 0 {
            let low_confidence = reviewed_records.iter().filter(|d| d.confidence < 0.5).count();
            if low_confidence as f64 / reviewed as f64 > 0.3 {
                findings.push(AuditFinding {
                    finding_type: AuditFindingType::LowConfidencePattern,
                    issue_level: IssueLevel::Minor,
                    detail: format!("{low_confidence}/{reviewed} decisions below confidence 0.5"),
                });
            }
        }

        let compliance = if findings.iter().any(|f| f.issue_level == IssueLevel::Major) {
            ComplianceStatus::NonCompliant
        } else if findings.is_empty() {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::MinorIssue
        };

        AuditResult { findings, compliance, reviewed }
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn auditor() -> EthicsDecisionAuditor {
        EthicsDecisionAuditor::new(Arc::new(SystemClock), 10_000)
    }

    #[test]
    fn no_findings_for_uniform_outcomes() {
        let auditor = auditor();
        for _ in 0..10 {
            auditor.record_decision(Some("A".to_string()), true, 0.9);
        }
        for _ in 0..10 {
            auditor.record_decision(Some("B".to_string()), true, 0.9);
        }
        let result = auditor.audit(20);
        assert!(result.findings.is_empty());
        assert_eq!(result.compliance, ComplianceStatus::Compliant);
    }

    #[test]
    fn large_gap_is_major() {
        let auditor = auditor();
        for _ in 0..10 {
            auditor.record_decision(Some("A".to_string()), true, 0.9);
        }
        for _ in 0..10 {
            auditor.record_decision(Some("B".to_string()), false, 0.9);
        }
        let result = auditor.audit(20);
        assert_eq!(result.compliance, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn low_confidence_pattern_detected() {
        let auditor = auditor();
        for _ in 0..7 {
            auditor.record_decision(None, true, 0.2);
        }
        for _ in 0..3 {
            auditor.record_decision(None, true, 0.9);
        }
        let result = auditor.audit(10);
        assert!(result.findings.iter().any(|f| f.finding_type == AuditFindingType::LowConfidencePattern));
    }

    #[test]
    fn retention_limit_truncates_oldest() {
        let auditor = EthicsDecisionAuditor::new(Arc::new(SystemClock), 5);
        for _ in 0..8 {
            auditor.record_decision(None, true, 0.9);
        }
        assert_eq!(auditor.len(), 5);
    }
}
