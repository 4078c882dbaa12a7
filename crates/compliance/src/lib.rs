//! Policy enforcement, data flow mapping, retention checking, consent
//! tracking and gap analysis for regulatory compliance.

pub mod access_auditor;
pub mod consent_manager;
pub mod data_flow_mapper;
pub mod error;
pub mod framework_loader;
pub mod gap_analyzer;
pub mod orchestrator;
pub mod policy_enforcer;
pub mod retention_checker;

pub use access_auditor::{
    AccessAuditSummary, AccessLog, AccessLogId, AccessType, ComplianceAccessAuditor, PrivilegeReport, ResourceAccessReport, ResourceType, UserAccessReport,
};
pub use consent_manager::{ComplianceConsentManager, ConsentAuditEntry, ConsentRecord, ConsentState};
pub use data_flow_mapper::{AssetCategory, AssetId, DataAsset, DataFlow, DataFlowMapper, FlowId};
pub use error::{ComplianceError, Result};
pub use framework_loader::{ComplianceFrameworkLoader, Framework, Requirement, RequirementId};
pub use gap_analyzer::{AssessmentResult, ComplianceGapAnalyzer, Control, ControlStatus, Gap, GapId, GapState};
pub use orchestrator::{ComplianceOrchestrator, ComplianceSummary};
pub use policy_enforcer::{Policy, PolicyEnforcer, PolicyException, PolicyExceptionId, PolicyId, PolicyOperator, PolicyViolation, Remediation};
pub use retention_checker::{ExpirationCheck, RetentionPolicy, RetentionPolicyChecker, RetentionPolicyId, RetentionType, TrackedRecord, TrackedRecordId};
