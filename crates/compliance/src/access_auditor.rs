//! Logs access attempts against protected resources and reports on
//! them: per-user and per-resource history, unauthorized attempts, and
//! privilege-usage breakdowns.

use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

define_domain_id!(AccessLogId, "alog");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    PersonalData,
    FinancialData,
    HealthData,
    SystemConfig,
    AuditLog,
    UserAccount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    Read,
    Write,
    Delete,
    Export,
    Share,
    Admin,
}

impl AccessType {
    /// `admin`, `delete` and `export` accesses are privileged and are
    /// tracked separately for the privilege-usage report.
    fn is_privileged(self) -> bool {
        matches!(self, AccessType::Admin | AccessType::Delete | AccessType::Export)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    pub id: AccessLogId,
    pub user_id: String,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub access_type: AccessType,
    pub is_authorized: bool,
    pub ip_address: String,
    pub reason: String,
    pub logged_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<AccessLogId> for AccessLog {
    fn id(&self) -> AccessLogId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccessReport {
    pub user_id: String,
    pub accesses: Vec<AccessLog>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAccessReport {
    pub resource_id: String,
    pub accesses: Vec<AccessLog>,
    pub unique_users: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivilegeReport {
    pub total_privilege_uses: usize,
    pub by_type: HashMap<String, u64>,
    pub by_user: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessAuditSummary {
    pub total_logs: usize,
    pub unauthorized: usize,
    pub privilege_uses: usize,
}

pub struct ComplianceAccessAuditor {
    logs: RecordStore<AccessLogId, AccessLog>,
    unauthorized: RecordStore<AccessLogId, AccessLog>,
    privilege_usage: RecordStore<AccessLogId, AccessLog>,
    clock: Arc<dyn Clock>,
}

impl ComplianceAccessAuditor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { logs: RecordStore::new(), unauthorized: RecordStore::new(), privilege_usage: RecordStore::new(), clock }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_access(
        &self,
        user_id: impl Into<String>,
        resource_type: ResourceType,
        resource_id: impl Into<String>,
        access_type: AccessType,
        is_authorized: bool,
        ip_address: impl Into<String>,
        reason: impl Into<String>,
    ) -> AccessLogId {
        let log = AccessLog {
            id: AccessLogId::new(),
            user_id: user_id.into(),
            resource_type,
            resource_id: resource_id.into(),
            access_type,
            is_authorized,
            ip_address: ip_address.into(),
            reason: reason.into(),
            logged_at: self.clock.now(),
        };
        let id = log.id;

        if !is_authorized {
            warn!(user = %log.user_id, resource = %log.resource_id, access_type = ?log.access_type, "unauthorized access attempt");
            self.unauthorized.insert(log.clone());
        }
        if log.access_type.is_privileged() {
            self.privilege_usage.insert(log.clone());
        }

        self.logs.insert(log);
        id
    }

    /// The `limit` most recent accesses by the given user, plus the
    /// user's total access count.
    pub fn get_user_access(&self, user_id: &str, limit: usize) -> UserAccessReport {
        let mut matching: Vec<AccessLog> = self.logs.all().into_iter().filter(|l| l.user_id == user_id).collect();
        matching.sort_by_key(|l| l.logged_at);
        let total = matching.len();
        if matching.len() > limit {
            matching = matching.split_off(matching.len() - limit);
        }
        UserAccessReport { user_id: user_id.to_string(), accesses: matching, total }
    }

    pub fn get_resource_access(&self, resource_id: &str) -> ResourceAccessReport {
        let accesses: Vec<AccessLog> = self.logs.all().into_iter().filter(|l| l.resource_id == resource_id).collect();
        let unique_users = accesses.iter().map(|l| l.user_id.clone()).collect::<std::collections::HashSet<_>>().len();
        ResourceAccessReport { resource_id: resource_id.to_string(), accesses, unique_users }
    }

    pub fn get_unauthorized_attempts(&self) -> Vec<AccessLog> {
        self.unauthorized.all()
    }

    pub fn get_privilege_report(&self) -> PrivilegeReport {
        let uses = self.privilege_usage.all();
        let mut by_type = HashMap::new();
        let mut by_user = HashMap::new();
        for use_ in &uses {
            *by_type.entry(format!("{:?}", use_.access_type)).or_insert(0) += 1;
            *by_user.entry(use_.user_id.clone()).or_insert(0) += 1;
        }
        PrivilegeReport { total_privilege_uses: uses.len(), by_type, by_user }
    }

    pub fn get_summary(&self) -> AccessAuditSummary {
        AccessAuditSummary { total_logs: self.logs.len(), unauthorized: self.unauthorized.len(), privilege_uses: self.privilege_usage.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn auditor() -> ComplianceAccessAuditor {
        ComplianceAccessAuditor::new(Arc::new(SystemClock))
    }

    #[test]
    fn unauthorized_access_is_tracked_separately() {
        let auditor = auditor();
        auditor.log_access("u1", ResourceType::PersonalData, "r1", AccessType::Read, false, "10.0.0.1", "no grant");
        auditor.log_access("u1", ResourceType::PersonalData, "r2", AccessType::Read, true, "10.0.0.1", "");
        let attempts = auditor.get_unauthorized_attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].resource_id, "r1");
    }

    #[test]
    fn privileged_access_types_feed_privilege_report() {
        let auditor = auditor();
        auditor.log_access("u1", ResourceType::FinancialData, "r1", AccessType::Export, true, "", "");
        auditor.log_access("u1", ResourceType::FinancialData, "r2", AccessType::Read, true, "", "");
        auditor.log_access("u2", ResourceType::SystemConfig, "r3", AccessType::Admin, true, "", "");

        let report = auditor.get_privilege_report();
        assert_eq!(report.total_privilege_uses, 2);
        assert_eq!(report.by_user["u1"], 1);
        assert_eq!(report.by_user["u2"], 1);
    }

    #[test]
    fn user_access_report_respects_limit_and_total() {
        let auditor = auditor();
        for i in 0..5 {
            auditor.log_access("u1", ResourceType::AuditLog, format!("r{i}"), AccessType::Read, true, "", "");
        }
        let report = auditor.get_user_access("u1", 3);
        assert_eq!(report.total, 5);
        assert_eq!(report.accesses.len(), 3);
    }

    #[test]
    fn resource_access_report_counts_unique_users() {
        let auditor = auditor();
        auditor.log_access("u1", ResourceType::UserAccount, "r1", AccessType::Read, true, "", "");
        auditor.log_access("u2", ResourceType::UserAccount, "r1", AccessType::Write, true, "", "");
        auditor.log_access("u1", ResourceType::UserAccount, "r1", AccessType::Read, true, "", "");

        let report = auditor.get_resource_access("r1");
        assert_eq!(report.accesses.len(), 3);
        assert_eq!(report.unique_users, 2);
    }

    #[test]
    fn summary_reflects_logged_totals() {
        let auditor = auditor();
        auditor.log_access("u1", ResourceType::HealthData, "r1", AccessType::Delete, false, "", "");
        let summary = auditor.get_summary();
        assert_eq!(summary.total_logs, 1);
        assert_eq!(summary.unauthorized, 1);
        assert_eq!(summary.privilege_uses, 1);
    }
}
