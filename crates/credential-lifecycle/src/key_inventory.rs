//! Registry of managed keys and their lifecycle status.

use crate::error::{CredentialError, Result};
use governance_core::{define_domain_id, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

define_domain_id!(KeyId, "ki");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    ApiKey,
    OauthToken,
    SshKey,
    TlsCert,
    JwtSecret,
    ServiceAccount,
    EncryptionKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Active,
    Inactive,
    Expired,
    Revoked,
    Rotating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub id: KeyId,
    pub name: String,
    pub key_type: KeyType,
    pub owner: String,
    pub service: String,
    pub scopes: Vec<String>,
    pub status: KeyStatus,
    pub usage_count: u64,
    pub expires_days: Option<i64>,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<KeyId> for Key {
    fn id(&self) -> KeyId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyInventorySummary {
    pub total: u64,
    pub by_status: HashMap<String, u64>,
}

pub struct KeyInventory {
    keys: RecordStore<KeyId, Key>,
    clock: Arc<dyn Clock>,
}

impl KeyInventory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { keys: RecordStore::new(), clock }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn register_key(
        &self,
        name: impl Into<String>,
        key_type: KeyType,
        owner: impl Into<String>,
        service: impl Into<String>,
        scopes: Vec<String>,
        expires_days: Option<i64>,
    ) -> KeyId {
        let key = Key {
            id: KeyId::new(),
            name: name.into(),
            key_type,
            owner: owner.into(),
            service: service.into(),
            scopes,
            status: KeyStatus::Active,
            usage_count: 0,
            expires_days,
            registered_at: self.clock.now(),
        };
        let id = key.id;
        debug!(key_id = %id, "registered key");
        self.keys.insert(key);
        id
    }

    pub fn get_key(&self, key_id: KeyId) -> Result<Key> {
        self.keys.get(key_id).ok_or_else(|| CredentialError::KeyNotFound { id: key_id.to_string() })
    }

    pub fn update_status(&self, key_id: KeyId, status: KeyStatus) -> Result<Key> {
        self.keys.update(key_id, |k| k.status = status).ok_or_else(|| CredentialError::KeyNotFound { id: key_id.to_string() })
    }

    pub fn record_usage(&self, key_id: KeyId) -> Result<Key> {
        self.keys.update(key_id, |k| k.usage_count += 1).ok_or_else(|| CredentialError::KeyNotFound { id: key_id.to_string() })
    }

    pub fn list_by_owner(&self, owner: &str) -> Vec<Key> {
        self.keys.all().into_iter().filter(|k| k.owner == owner).collect()
    }

    pub fn list_by_service(&self, service: &str) -> Vec<Key> {
        self.keys.all().into_iter().filter(|k| k.service == service).collect()
    }

    pub fn get_summary(&self) -> KeyInventorySummary {
        let keys = self.keys.all();
        let mut by_status = HashMap::new();
        for key in &keys {
            *by_status.entry(format!("{:?}", key.status)).or_insert(0) += 1;
        }
        KeyInventorySummary { total: keys.len() as u64, by_status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;

    fn inventory() -> KeyInventory {
        KeyInventory::new(Arc::new(SystemClock))
    }

    #[test]
    fn registered_key_starts_active() {
        let inventory = inventory();
        let id = inventory.register_key("prod-key", KeyType::ApiKey, "svc-team", "billing", vec!["read".to_string()], Some(90));
        assert_eq!(inventory.get_key(id).unwrap().status, KeyStatus::Active);
    }

    /// Revocation idempotence of identity: a revoked key's id keeps resolving.
    #[test]
    fn revoked_key_still_resolves() {
        let inventory = inventory();
        let id = inventory.register_key("prod-key", KeyType::ApiKey, "svc-team", "billing", vec![], None);
        inventory.update_status(id, KeyStatus::Revoked).unwrap();
        let key = inventory.get_key(id).unwrap();
        assert_eq!(key.status, KeyStatus::Revoked);
    }

    #[test]
    fn list_by_owner_filters_correctly() {
        let inventory = inventory();
        inventory.register_key("a", KeyType::ApiKey, "alice", "svc", vec![], None);
        inventory.register_key("b", KeyType::ApiKey, "bob", "svc", vec![], None);
        assert_eq!(inventory.list_by_owner("alice").len(), 1);
    }
}
