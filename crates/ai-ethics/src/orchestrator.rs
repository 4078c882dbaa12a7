//! Wires the AI-Ethics evaluators together behind a single handle, the
//! way each domain crate in this platform exposes one service per
//! aggregate.

use crate::decision_auditor::EthicsDecisionAuditor;
use crate::protected_class_monitor::ProtectedClassMonitor;
use crate::rule_engine::EthicsRuleEngine;
use crate::transparency_reporter::TransparencyReporter;
use crate::violation_alert::EthicsViolationAlert;
use crate::{BiasDetector, BiasThresholds, FairnessAnalyzer};
use governance_core::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiEthicsSummary {
    pub stats: HashMap<String, u64>,
}

/// Owns one instance of every AI-Ethics evaluator. Orchestrators never
/// mutate evaluator state directly; callers reach each evaluator through
/// its own public methods.
pub struct AiEthicsOrchestrator {
    pub bias_detector: BiasDetector,
    pub fairness_analyzer: FairnessAnalyzer,
    pub rule_engine: EthicsRuleEngine,
    pub decision_auditor: EthicsDecisionAuditor,
    pub violation_alert: EthicsViolationAlert,
    pub protected_class_monitor: ProtectedClassMonitor,
    pub transparency_reporter: TransparencyReporter,
}

impl AiEthicsOrchestrator {
    pub fn new(clock: Arc<dyn Clock>, retention_limit: usize, disparity_threshold: f64) -> Self {
        Self {
            bias_detector: BiasDetector::new(BiasThresholds::default()),
            fairness_analyzer: FairnessAnalyzer::default(),
            rule_engine: EthicsRuleEngine::new(),
            decision_auditor: EthicsDecisionAuditor::new(clock.clone(), retention_limit),
            violation_alert: EthicsViolationAlert::new(clock.clone()),
            protected_class_monitor: ProtectedClassMonitor::new(clock, disparity_threshold),
            transparency_reporter: TransparencyReporter::new(),
        }
    }

    pub fn get_summary(&self) -> AiEthicsSummary {
        let mut stats = self.bias_detector.get_summary().stats;
        stats.insert("rule_engine_rules".to_string(), self.rule_engine.get_summary()["rules"]);
        stats.insert("decisions_logged".to_string(), self.decision_auditor.len() as u64);
        stats.insert("alerts".to_string(), self.violation_alert.len() as u64);
        AiEthicsSummary { stats }
    }
}

impl Default for AiEthicsOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), 10_000, 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orchestrator_summary_reports_zero_for_fresh_instance() {
        let orchestrator = AiEthicsOrchestrator::default();
        let summary = orchestrator.get_summary();
        assert_eq!(summary.stats["datasets"], 0);
        assert_eq!(summary.stats["alerts"], 0);
    }
}
