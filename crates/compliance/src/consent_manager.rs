//! Tracks user consent per (user, purpose) pair with an audited
//! lifecycle.

use crate::error::{ComplianceError, Result};
use governance_core::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    Granted,
    Denied,
    Withdrawn,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub user_id: String,
    pub purpose_id: String,
    pub state: ConsentState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentAuditEntry {
    pub user_id: String,
    pub purpose_id: String,
    pub from: Option<ConsentState>,
    pub to: ConsentState,
    pub at: chrono::DateTime<chrono::Utc>,
}

pub struct ComplianceConsentManager {
    records: RwLock<HashMap<(String, String), ConsentState>>,
    audit_trail: RwLock<Vec<ConsentAuditEntry>>,
    clock: Arc<dyn Clock>,
}

impl ComplianceConsentManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { records: RwLock::new(HashMap::new()), audit_trail: RwLock::new(Vec::new()), clock }
    }

    fn set_state(&self, user_id: &str, purpose_id: &str, to: ConsentState) {
        let key = (user_id.to_string(), purpose_id.to_string());
        let from = self.records.read().unwrap().get(&key).copied();
        self.records.write().unwrap().insert(key, to);
        self.audit_trail.write().unwrap().push(ConsentAuditEntry {
            user_id: user_id.to_string(),
            purpose_id: purpose_id.to_string(),
            from,
            to,
            at: self.clock.now(),
        });
    }

    pub fn grant(&self, user_id: &str, purpose_id: &str) {
        self.set_state(user_id, purpose_id, ConsentState::Granted);
    }

    pub fn deny(&self, user_id: &str, purpose_id: &str) {
        self.set_state(user_id, purpose_id, ConsentState::Denied);
    }

    pub fn withdraw(&self, user_id: &str, purpose_id: &str) -> Result<()> {
        let key = (user_id.to_string(), purpose_id.to_string());
        let current = self.records.read().unwrap().get(&key).copied();
        match current {
            Some(ConsentState::Granted) => {
                self.set_state(user_id, purpose_id, ConsentState::Withdrawn);
                Ok(())
            }
            Some(other) => Err(ComplianceError::InvalidConsentTransition { from: format!("{other:?}"), to: "Withdrawn".to_string() }),
            None => Err(ComplianceError::ConsentNotFound { user_id: user_id.to_string(), purpose_id: purpose_id.to_string() }),
        }
    }

    pub fn expire(&self, user_id: &str, purpose_id: &str) {
        self.set_state(user_id, purpose_id, ConsentState::Expired);
    }

    pub fn get_state(&self, user_id: &str, purpose_id: &str) -> Result<ConsentState> {
        self.records
            .read()
            .unwrap()
            .get(&(user_id.to_string(), purpose_id.to_string()))
            .copied()
            .ok_or_else(|| ComplianceError::ConsentNotFound { user_id: user_id.to_string(), purpose_id: purpose_id.to_string() })
    }

    pub fn audit_trail(&self) -> Vec<ConsentAuditEntry> {
        self.audit_trail.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn manager() -> ComplianceConsentManager {
        ComplianceConsentManager::new(Arc::new(SystemClock))
    }

    #[test]
    fn withdraw_only_valid_from_granted() {
        let manager = manager();
        manager.deny("u1", "marketing");
        assert!(manager.withdraw("u1", "marketing").is_err());
    }

    #[test]
    fn withdraw_from_granted_succeeds() {
        let manager = manager();
        manager.grant("u1", "marketing");
        manager.withdraw("u1", "marketing").unwrap();
        assert_eq!(manager.get_state("u1", "marketing").unwrap(), ConsentState::Withdrawn);
    }

    #[test]
    fn every_transition_is_logged() {
        let manager = manager();
        manager.grant("u1", "marketing");
        manager.withdraw("u1", "marketing").unwrap();
        assert_eq!(manager.audit_trail().len(), 2);
    }

    #[test]
    fn unknown_consent_errors() {
        let manager = manager();
        assert!(manager.get_state("u1", "marketing").is_err());
    }
}
