//! Immediate key revocation pipeline with optional cascade and
//! replacement-key generation.

use crate::key_inventory::KeyId;
use governance_core::{define_domain_id, generate_key_fingerprint, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

define_domain_id!(RevocationId, "rev");
define_domain_id!(CascadeId, "casc");
define_domain_id!(NotificationId, "notif");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    Compromised,
    Leaked,
    PolicyViolation,
    EmployeeOffboarded,
    Expired,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revocation {
    pub id: RevocationId,
    pub key_id: KeyId,
    pub reason: RevocationReason,
    pub replacement_key_prefix: Option<String>,
    pub revoked_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<RevocationId> for Revocation {
    fn id(&self) -> RevocationId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cascade {
    pub id: CascadeId,
    pub revocation_id: RevocationId,
}

impl Identified<CascadeId> for Cascade {
    fn id(&self) -> CascadeId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub revocation_id: RevocationId,
    pub service: String,
}

impl Identified<NotificationId> for Notification {
    fn id(&self) -> NotificationId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub key_id: KeyId,
    pub reason: RevocationReason,
    pub at: chrono::DateTime<chrono::Utc>,
}

#[derive(Default)]
pub struct InstantRevocator {
    revocations: RecordStore<RevocationId, Revocation>,
    cascades: RecordStore<CascadeId, Cascade>,
    notifications: RecordStore<NotificationId, Notification>,
    audit_log: std::sync::RwLock<Vec<AuditEntry>>,
}

pub struct BulkRevokeResult {
    pub succeeded: Vec<RevocationId>,
    pub failed: usize,
}

impl InstantRevocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn revoke_key(
        &self,
        key_id: KeyId,
        reason: RevocationReason,
        cascade: bool,
        generate_replacement: bool,
        notified_services: &[String],
        clock: &dyn Clock,
    ) -> Revocation {
        let now = clock.now();
        let replacement_key_prefix = generate_replacement.then(|| generate_key_fingerprint(key_id));

        let revocation = Revocation { id: RevocationId::new(), key_id, reason, replacement_key_prefix, revoked_at: now };
        let revocation_id = revocation.id;
        self.revocations.insert(revocation.clone());
        self.audit_log.write().unwrap().push(AuditEntry { key_id, reason, at: now });

        if cascade {
            self.cascades.insert(Cascade { id: CascadeId::new(), revocation_id });
        }

        for service in notified_services {
            self.notifications.insert(Notification { id: NotificationId::new(), revocation_id, service: service.clone() });
        }

        warn!(key_id = %key_id, ?reason, "key revoked");
        revocation
    }

    pub fn bulk_revoke(&self, key_ids: &[KeyId], reason: RevocationReason, clock: &dyn Clock) -> BulkRevokeResult {
        let mut succeeded = Vec::new();
        for key_id in key_ids {
            let revocation = self.revoke_key(*key_id, reason, false, false, &[], clock);
            succeeded.push(revocation.id);
        }
        BulkRevokeResult { succeeded, failed: 0 }
    }

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.audit_log.read().unwrap().clone()
    }

    pub fn notifications_for(&self, revocation_id: RevocationId) -> Vec<Notification> {
        self.notifications.all().into_iter().filter(|n| n.revocation_id == revocation_id).collect()
    }
}
