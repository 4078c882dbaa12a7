//! Bias detection, fairness analysis, ethics rule enforcement and
//! transparency reporting for AI-assisted decisions.

pub mod bias_detector;
pub mod decision_auditor;
pub mod error;
pub mod fairness_analyzer;
pub mod orchestrator;
pub mod protected_class_monitor;
pub mod remediation_suggester;
pub mod rule_engine;
pub mod transparency_reporter;
pub mod violation_alert;

pub use bias_detector::{BiasDetector, BiasThresholds, Dataset, DatasetId, Detection, DetectionId, Finding, FindingType};
pub use decision_auditor::{AuditFinding, AuditFindingType, AuditResult, ComplianceStatus, Decision, DecisionId, EthicsDecisionAuditor};
pub use error::{AiEthicsError, Result};
pub use fairness_analyzer::{FairnessAnalyzer, FairnessMetric, FairnessReport, MetricResult, Prediction};
pub use orchestrator::{AiEthicsOrchestrator, AiEthicsSummary};
pub use protected_class_monitor::{DifferentialTreatmentFlag, DisparityAlert, Observation, ProtectedClassMonitor};
pub use remediation_suggester::{EthicsRemediationSuggester, RemediationPlan};
pub use rule_engine::{EthicsRuleEngine, Exception, ExceptionId, Rule, RuleId, Violation};
pub use transparency_reporter::{
    Disclosure, DisclosureContent, DisclosureId, DisclosureStatus, ModelCard, StakeholderReport, TransparencyReporter,
};
pub use violation_alert::{Alert, AlertCondition, AlertId, AlertRule, AlertStatus, Escalation, EthicsViolationAlert};
