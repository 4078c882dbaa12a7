//! Evaluates retention policies against tracked records, respecting
//! active legal holds.

use crate::error::{ComplianceError, Result};
use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

define_domain_id!(RetentionPolicyId, "rpol");
define_domain_id!(TrackedRecordId, "trec");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionType {
    Fixed,
    EventBased,
    Indefinite,
    Regulatory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub id: RetentionPolicyId,
    pub retention_days: i64,
    pub retention_type: RetentionType,
    pub auto_delete: bool,
}

impl Identified<RetentionPolicyId> for RetentionPolicy {
    fn id(&self) -> RetentionPolicyId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpirationCheck {
    pub expired: bool,
    pub legal_hold: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedRecord {
    pub id: TrackedRecordId,
    pub policy_id: RetentionPolicyId,
    pub created_date: chrono::DateTime<chrono::Utc>,
    pub legal_hold: bool,
    pub deleted: bool,
}

impl Identified<TrackedRecordId> for TrackedRecord {
    fn id(&self) -> TrackedRecordId {
        self.id
    }
}

pub struct RetentionPolicyChecker {
    policies: RecordStore<RetentionPolicyId, RetentionPolicy>,
    records: RecordStore<TrackedRecordId, TrackedRecord>,
    clock: Arc<dyn Clock>,
}

impl RetentionPolicyChecker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { policies: RecordStore::new(), records: RecordStore::new(), clock }
    }

    pub fn add_policy(&self, retention_days: i64, retention_type: RetentionType, auto_delete: bool) -> RetentionPolicyId {
        let policy = RetentionPolicy { id: RetentionPolicyId::new(), retention_days, retention_type, auto_delete };
        let id = policy.id;
        self.policies.insert(policy);
        id
    }

    pub fn track_record(&self, policy_id: RetentionPolicyId, created_date: chrono::DateTime<chrono::Utc>) -> Result<TrackedRecordId> {
        if self.policies.get(policy_id).is_none() {
            return Err(ComplianceError::PolicyRecordNotFound { id: policy_id.to_string() });
        }
        let record = TrackedRecord { id: TrackedRecordId::new(), policy_id, created_date, legal_hold: false, deleted: false };
        let id = record.id;
        self.records.insert(record);
        Ok(id)
    }

    pub fn set_legal_hold(&self, record_id: TrackedRecordId, on: bool) -> Result<()> {
        self.records
            .update(record_id, |r| r.legal_hold = on)
            .map(|_| ())
            .ok_or_else(|| ComplianceError::PolicyRecordNotFound { id: record_id.to_string() })
    }

    pub fn check_expiration(&self, record_id: TrackedRecordId) -> Result<ExpirationCheck> {
        let record = self.records.get(record_id).ok_or_else(|| ComplianceError::PolicyRecordNotFound { id: record_id.to_string() })?;
        if record.legal_hold {
            return Ok(ExpirationCheck { expired: false, legal_hold: true });
        }
        let policy = self.policies.get(record.policy_id).ok_or_else(|| ComplianceError::PolicyRecordNotFound { id: record.policy_id.to_string() })?;
        let age_days = (self.clock.now() - record.created_date).num_days();
        Ok(ExpirationCheck { expired: age_days > policy.retention_days, legal_hold: false })
    }

    /// Deletes every active, expired record whose policy has `auto_delete`
    /// set. Returns the ids deleted.
    pub fn auto_delete_expired(&self) -> Vec<TrackedRecordId> {
        let mut deleted = Vec::new();
        for record in self.records.all() {
            if record.deleted || record.legal_hold {
                continue;
            }
            let Some(policy) = self.policies.get(record.policy_id) else { continue };
            if !policy.auto_delete {
                continue;
            }
            let age_days = (self.clock.now() - record.created_date).num_days();
            if age_days > policy.retention_days {
                self.records.update(record.id, |r| r.deleted = true);
                deleted.push(record.id);
            }
        }
        deleted
    }
}
