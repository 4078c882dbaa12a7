//! Verifies that a rotated key still works before the old value is
//! fully retired.

use crate::error::{CredentialError, Result};
use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};

define_domain_id!(VerificationId, "verif");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Testing,
    Passed,
    Failed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Connectivity,
    Authentication,
    Authorization,
    Functionality,
    Performance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_type: TestType,
    pub passed: bool,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub id: VerificationId,
    pub old_prefix: String,
    pub new_prefix: String,
    pub status: VerificationStatus,
    pub tests: Vec<TestRecord>,
}

impl Identified<VerificationId> for Verification {
    fn id(&self) -> VerificationId {
        self.id
    }
}

define_domain_id!(RollbackId, "rback");

/// A symbolic state-restore record, created when a failed verification
/// triggers `auto_rollback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rollback {
    pub id: RollbackId,
    pub verification_id: VerificationId,
    pub old_prefix: String,
    pub new_prefix: String,
}

impl Identified<RollbackId> for Rollback {
    fn id(&self) -> RollbackId {
        self.id
    }
}

#[derive(Default)]
pub struct RotationVerifier {
    verifications: RecordStore<VerificationId, Verification>,
    rollbacks: RecordStore<RollbackId, Rollback>,
}

impl RotationVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_verification(&self, old_prefix: impl Into<String>, new_prefix: impl Into<String>) -> VerificationId {
        let verification = Verification {
            id: VerificationId::new(),
            old_prefix: old_prefix.into(),
            new_prefix: new_prefix.into(),
            status: VerificationStatus::Pending,
            tests: Vec::new(),
        };
        let id = verification.id;
        self.verifications.insert(verification);
        id
    }

    pub fn run_test(&self, verification_id: VerificationId, test_type: TestType, passed: bool, response_time_ms: u64) -> Result<Verification> {
        self.verifications
            .update(verification_id, |v| {
                v.tests.push(TestRecord { test_type, passed, response_time_ms });
                v.status = VerificationStatus::Testing;
            })
            .ok_or_else(|| CredentialError::VerificationNotFound { id: verification_id.to_string() })
    }

    pub fn run_full_verification(&self, verification_id: VerificationId, test_results: Vec<TestRecord>, auto_rollback: bool) -> Result<Verification> {
        let all_passed = test_results.iter().all(|t| t.passed);
        let rolls_back = !all_passed && auto_rollback;
        let verification = self
            .verifications
            .update(verification_id, |v| {
                v.tests.extend(test_results.clone());
                v.status = if all_passed {
                    VerificationStatus::Passed
                } else if auto_rollback {
                    VerificationStatus::RolledBack
                } else {
                    VerificationStatus::Failed
                };
            })
            .ok_or_else(|| CredentialError::VerificationNotFound { id: verification_id.to_string() })?;

        if rolls_back {
            self.rollbacks.insert(Rollback {
                id: RollbackId::new(),
                verification_id,
                old_prefix: verification.old_prefix.clone(),
                new_prefix: verification.new_prefix.clone(),
            });
        }

        Ok(verification)
    }

    pub fn get(&self, verification_id: VerificationId) -> Result<Verification> {
        self.verifications.get(verification_id).ok_or_else(|| CredentialError::VerificationNotFound { id: verification_id.to_string() })
    }

    pub fn rollback_for(&self, verification_id: VerificationId) -> Option<Rollback> {
        self.rollbacks.all().into_iter().find(|r| r.verification_id == verification_id)
    }
}
