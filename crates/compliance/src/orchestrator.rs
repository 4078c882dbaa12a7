//! Wires the compliance evaluators together behind a single handle.

use crate::access_auditor::ComplianceAccessAuditor;
use crate::consent_manager::ComplianceConsentManager;
use crate::data_flow_mapper::DataFlowMapper;
use crate::framework_loader::ComplianceFrameworkLoader;
use crate::gap_analyzer::ComplianceGapAnalyzer;
use crate::policy_enforcer::PolicyEnforcer;
use crate::retention_checker::RetentionPolicyChecker;
use governance_core::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub stats: HashMap<String, u64>,
}

pub struct ComplianceOrchestrator {
    pub framework_loader: ComplianceFrameworkLoader,
    pub policy_enforcer: PolicyEnforcer,
    pub data_flow_mapper: DataFlowMapper,
    pub retention_checker: RetentionPolicyChecker,
    pub consent_manager: ComplianceConsentManager,
    pub gap_analyzer: ComplianceGapAnalyzer,
    pub access_auditor: ComplianceAccessAuditor,
}

impl ComplianceOrchestrator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            framework_loader: ComplianceFrameworkLoader::with_builtins(),
            policy_enforcer: PolicyEnforcer::new(),
            data_flow_mapper: DataFlowMapper::new(),
            retention_checker: RetentionPolicyChecker::new(clock.clone()),
            consent_manager: ComplianceConsentManager::new(clock.clone()),
            gap_analyzer: ComplianceGapAnalyzer::new(),
            access_auditor: ComplianceAccessAuditor::new(clock),
        }
    }

    pub fn get_summary(&self) -> ComplianceSummary {
        let mut stats = self.policy_enforcer.get_summary();
        stats.insert("frameworks".to_string(), self.framework_loader.list_frameworks().len() as u64);
        stats.insert("gaps".to_string(), self.gap_analyzer.roadmap().len() as u64);
        let access_summary = self.access_auditor.get_summary();
        stats.insert("access_logs".to_string(), access_summary.total_logs as u64);
        stats.insert("unauthorized_access".to_string(), access_summary.unauthorized as u64);
        ComplianceSummary { stats }
    }
}

impl Default for ComplianceOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orchestrator_preseeds_builtin_frameworks() {
        let orchestrator = ComplianceOrchestrator::default();
        let summary = orchestrator.get_summary();
        assert_eq!(summary.stats["frameworks"], 4);
    }
}
