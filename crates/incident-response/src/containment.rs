//! Automated containment: quarantine and suspension actions applied
//! across an incident's affected systems.

use crate::error::{IncidentError, Result};
use crate::incident_detector::IncidentId;
use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

define_domain_id!(ContainmentId, "cont");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentAction {
    NetworkIsolate,
    AccountSuspend,
    ServiceShutdown,
    PortBlock,
    IpBlock,
    ProcessKill,
    FileQuarantine,
    CredentialRevoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentStatus {
    Active,
    Released,
    Reinstated,
}

/// `network_isolate` produces a Quarantine record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quarantine {
    pub id: ContainmentId,
    pub incident_id: IncidentId,
    pub target: String,
    pub status: ContainmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<ContainmentId> for Quarantine {
    fn id(&self) -> ContainmentId {
        self.id
    }
}

/// `account_suspend` produces a Suspension record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suspension {
    pub id: ContainmentId,
    pub incident_id: IncidentId,
    pub target: String,
    pub status: ContainmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<ContainmentId> for Suspension {
    fn id(&self) -> ContainmentId {
        self.id
    }
}

/// The remaining actions have no dedicated record type; they're
/// logged as a flat containment action and (for `service_shutdown`)
/// also bump a counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: ContainmentId,
    pub incident_id: IncidentId,
    pub action: ContainmentAction,
    pub target: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<ContainmentId> for ActionRecord {
    fn id(&self) -> ContainmentId {
        self.id
    }
}

pub struct AutoContainment {
    quarantines: RecordStore<ContainmentId, Quarantine>,
    suspensions: RecordStore<ContainmentId, Suspension>,
    actions: RecordStore<ContainmentId, ActionRecord>,
    shutdown_count: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl AutoContainment {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            quarantines: RecordStore::new(),
            suspensions: RecordStore::new(),
            actions: RecordStore::new(),
            shutdown_count: AtomicU64::new(0),
            clock,
        }
    }

    /// Applies the Cartesian product of `actions` x `targets`, each
    /// producing its own containment record. Returns the ids of every
    /// record created (quarantine, suspension or plain action).
    pub fn contain_incident(
        &self,
        incident_id: IncidentId,
        actions: &[ContainmentAction],
        targets: &[String],
    ) -> Vec<ContainmentId> {
        let mut created = Vec::with_capacity(actions.len() * targets.len());
        for &action in actions {
            for target in targets {
                let id = ContainmentId::new();
                let created_at = self.clock.now();
                match action {
                    ContainmentAction::NetworkIsolate => {
                        self.quarantines.insert(Quarantine {
                            id,
                            incident_id,
                            target: target.clone(),
                            status: ContainmentStatus::Active,
                            created_at,
                        });
                    }
                    ContainmentAction::AccountSuspend => {
                        self.suspensions.insert(Suspension {
                            id,
                            incident_id,
                            target: target.clone(),
                            status: ContainmentStatus::Active,
                            created_at,
                        });
                    }
                    ContainmentAction::ServiceShutdown => {
                        self.shutdown_count.fetch_add(1, Ordering::SeqCst);
                        self.actions.insert(ActionRecord { id, incident_id, action, target: target.clone(), created_at });
                    }
                    _ => {
                        self.actions.insert(ActionRecord { id, incident_id, action, target: target.clone(), created_at });
                    }
                }
                warn!(incident_id = %incident_id, target = %target, ?action, "containment applied");
                created.push(id);
            }
        }
        created
    }

    pub fn release(&self, id: ContainmentId) -> Result<()> {
        if self.quarantines.update(id, |q| q.status = ContainmentStatus::Released).is_some() {
            return Ok(());
        }
        if self.suspensions.update(id, |s| s.status = ContainmentStatus::Released).is_some() {
            return Ok(());
        }
        Err(IncidentError::QuarantineNotFound { id: id.to_string() })
    }

    pub fn reinstate(&self, id: ContainmentId) -> Result<()> {
        if self.quarantines.update(id, |q| q.status = ContainmentStatus::Reinstated).is_some() {
            return Ok(());
        }
        if self.suspensions.update(id, |s| s.status = ContainmentStatus::Reinstated).is_some() {
            return Ok(());
        }
        Err(IncidentError::QuarantineNotFound { id: id.to_string() })
    }

    pub fn quarantines_for(&self, incident_id: IncidentId) -> Vec<Quarantine> {
        self.quarantines.all().into_iter().filter(|q| q.incident_id == incident_id).collect()
    }

    pub fn suspensions_for(&self, incident_id: IncidentId) -> Vec<Suspension> {
        self.suspensions.all().into_iter().filter(|s| s.incident_id == incident_id).collect()
    }

    pub fn shutdown_count(&self) -> u64 {
        self.shutdown_count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn containment() -> AutoContainment {
        AutoContainment::new(Arc::new(SystemClock))
    }

    #[test]
    fn contain_incident_applies_cartesian_product() {
        let containment = containment();
        let incident_id = IncidentId::new();
        let created = containment.contain_incident(
            incident_id,
            &[ContainmentAction::NetworkIsolate, ContainmentAction::IpBlock],
            &["host-1".to_string(), "host-2".to_string()],
        );
        assert_eq!(created.len(), 4);
        assert_eq!(containment.quarantines_for(incident_id).len(), 2);
    }

    #[test]
    fn account_suspend_creates_suspension_record() {
        let containment = containment();
        let incident_id = IncidentId::new();
        containment.contain_incident(incident_id, &[ContainmentAction::AccountSuspend], &["user-42".to_string()]);
        assert_eq!(containment.suspensions_for(incident_id).len(), 1);
    }

    #[test]
    fn service_shutdown_only_increments_counter() {
        let containment = containment();
        let incident_id = IncidentId::new();
        containment.contain_incident(incident_id, &[ContainmentAction::ServiceShutdown], &["svc-a".to_string(), "svc-b".to_string()]);
        assert_eq!(containment.shutdown_count(), 2);
        assert!(containment.quarantines_for(incident_id).is_empty());
        assert!(containment.suspensions_for(incident_id).is_empty());
    }

    #[test]
    fn release_then_reinstate_round_trips_quarantine_status() {
        let containment = containment();
        let incident_id = IncidentId::new();
        let created = containment.contain_incident(incident_id, &[ContainmentAction::NetworkIsolate], &["host-1".to_string()]);
        let id = created[0];
        containment.release(id).unwrap();
        assert_eq!(containment.quarantines_for(incident_id)[0].status, ContainmentStatus::Released);
        containment.reinstate(id).unwrap();
        assert_eq!(containment.quarantines_for(incident_id)[0].status, ContainmentStatus::Reinstated);
    }

    #[test]
    fn release_unknown_id_errors() {
        let containment = containment();
        assert!(containment.release(ContainmentId::new()).is_err());
    }
}
