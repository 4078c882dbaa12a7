//! Flags keys holding scopes they have never exercised.

use crate::key_inventory::KeyId;
use governance_core::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionReport {
    pub unused_scopes: Vec<String>,
    pub has_admin: bool,
    pub total_scopes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverPermissionFinding {
    pub key_id: KeyId,
    pub unused_scopes: Vec<String>,
    pub severity: Severity,
}

#[derive(Default)]
pub struct OverPermissionDetector {
    used_scopes: RwLock<HashMap<KeyId, HashSet<String>>>,
}

impl OverPermissionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scope_usage(&self, key_id: KeyId, scope: impl Into<String>) {
        self.used_scopes.write().unwrap().entry(key_id).or_default().insert(scope.into());
    }

    pub fn detect(&self, key_id: KeyId, granted_scopes: &[String]) -> PermissionReport {
        let used = self.used_scopes.read().unwrap();
        let used_for_key = used.get(&key_id).cloned().unwrap_or_default();
        let unused_scopes: Vec<String> = granted_scopes.iter().filter(|s| !used_for_key.contains(*s)).cloned().collect();
        let has_admin = granted_scopes.iter().any(|s| s == "admin" || s == "*");
        PermissionReport { unused_scopes, has_admin, total_scopes: granted_scopes.len() }
    }

    pub fn finding_for(&self, key_id: KeyId, granted_scopes: &[String]) -> Option<OverPermissionFinding> {
        let report = self.detect(key_id, granted_scopes);
        if report.unused_scopes.is_empty() {
            return None;
        }
        let severity = if report.unused_scopes.len() > 3 { Severity::Medium } else { Severity::Low };
        Some(OverPermissionFinding { key_id, unused_scopes: report.unused_scopes, severity })
    }
}
