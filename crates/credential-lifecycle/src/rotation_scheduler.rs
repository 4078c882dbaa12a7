//! Schedules and executes key rotations.

use crate::error::{CredentialError, Result};
use crate::key_inventory::KeyId;
use governance_core::{define_domain_id, generate_key_fingerprint, Clock, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::debug;

define_domain_id!(ScheduleId, "rsch");
define_domain_id!(HistoryEntryId, "rhist");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationStrategy {
    TimeBased,
    UsageBased,
    EventBased,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationSchedule {
    pub id: ScheduleId,
    pub key_id: KeyId,
    pub strategy: RotationStrategy,
    pub rotation_days: i64,
    pub last_rotated: Option<chrono::DateTime<chrono::Utc>>,
    pub status: ScheduleStatus,
}

impl Identified<ScheduleId> for RotationSchedule {
    fn id(&self) -> ScheduleId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationHistoryEntry {
    pub id: HistoryEntryId,
    pub schedule_id: ScheduleId,
    pub new_key_prefix: String,
    pub rotated_at: chrono::DateTime<chrono::Utc>,
}

impl Identified<HistoryEntryId> for RotationHistoryEntry {
    fn id(&self) -> HistoryEntryId {
        self.id
    }
}

pub type Hook = Arc<dyn Fn(KeyId) + Send + Sync>;

#[derive(Default)]
pub struct AutoRotationScheduler {
    schedules: RecordStore<ScheduleId, RotationSchedule>,
    history: RecordStore<HistoryEntryId, RotationHistoryEntry>,
    pre_hooks: RwLock<Vec<Hook>>,
    post_hooks: RwLock<Vec<Hook>>,
}

impl AutoRotationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_pre_hook(&self, hook: Hook) {
        self.pre_hooks.write().unwrap().push(hook);
    }

    pub fn register_post_hook(&self, hook: Hook) {
        self.post_hooks.write().unwrap().push(hook);
    }

    pub fn attach_schedule(&self, key_id: KeyId, strategy: RotationStrategy, rotation_days: i64) -> ScheduleId {
        let schedule = RotationSchedule {
            id: ScheduleId::new(),
            key_id,
            strategy,
            rotation_days,
            last_rotated: None,
            status: ScheduleStatus::Pending,
        };
        let id = schedule.id;
        self.schedules.insert(schedule);
        id
    }

    /// Runs pre-hooks (always succeed symbolically), mints a new key
    /// fingerprint, marks the schedule completed, runs post-hooks, and
    /// appends a history entry.
    pub fn execute_rotation(&self, schedule_id: ScheduleId, clock: &dyn Clock) -> Result<RotationHistoryEntry> {
        let schedule = self.schedules.get(schedule_id).ok_or_else(|| CredentialError::ScheduleNotFound { id: schedule_id.to_string() })?;

        for hook in self.pre_hooks.read().unwrap().iter() {
            hook(schedule.key_id);
        }

        let new_key_prefix = generate_key_fingerprint(schedule.key_id);
        let now = clock.now();
        self.schedules.update(schedule_id, |s| {
            s.last_rotated = Some(now);
            s.status = ScheduleStatus::Completed;
        });

        for hook in self.post_hooks.read().unwrap().iter() {
            hook(schedule.key_id);
        }

        let entry = RotationHistoryEntry { id: HistoryEntryId::new(), schedule_id, new_key_prefix, rotated_at: now };
        self.history.insert(entry.clone());
        debug!(schedule_id = %schedule_id, "executed key rotation");
        Ok(entry)
    }

    /// Schedules with `rotation_days <= 7`; urgent when `<= 3`.
    pub fn check_due_rotations(&self) -> Vec<(RotationSchedule, bool)> {
        self.schedules
            .all()
            .into_iter()
            .filter(|s| s.rotation_days <= 7)
            .map(|s| {
                let urgent = s.rotation_days <= 3;
                (s, urgent)
            })
            .collect()
    }

    pub fn history_for(&self, schedule_id: ScheduleId) -> Vec<RotationHistoryEntry> {
        self.history.all().into_iter().filter(|h| h.schedule_id == schedule_id).collect()
    }

    pub fn get_schedule(&self, schedule_id: ScheduleId) -> Option<RotationSchedule> {
        self.schedules.get(schedule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governance_core::SystemClock;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn execute_rotation_appends_history() {
        let scheduler = AutoRotationScheduler::new();
        let key_id = KeyId::new();
        let schedule_id = scheduler.attach_schedule(key_id, RotationStrategy::TimeBased, 30);
        let entry = scheduler.execute_rotation(schedule_id, &SystemClock).unwrap();
        assert_eq!(entry.new_key_prefix.len(), 32);
        assert_eq!(scheduler.schedules.get(schedule_id).unwrap().status, ScheduleStatus::Completed);
    }

    #[test]
    fn hooks_run_around_rotation() {
        let scheduler = AutoRotationScheduler::new();
        let pre_count = Arc::new(AtomicU32::new(0));
        let post_count = Arc::new(AtomicU32::new(0));
        let pre_clone = pre_count.clone();
        let post_clone = post_count.clone();
        scheduler.register_pre_hook(Arc::new(move |_| {
            pre_clone.fetch_add(1, Ordering::SeqCst);
        }));
        scheduler.register_post_hook(Arc::new(move |_| {
            post_clone.fetch_add(1, Ordering::SeqCst);
        }));
        let schedule_id = scheduler.attach_schedule(KeyId::new(), RotationStrategy::Manual, 30);
        scheduler.execute_rotation(schedule_id, &SystemClock).unwrap();
        assert_eq!(pre_count.load(Ordering::SeqCst), 1);
        assert_eq!(post_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn due_rotations_mark_urgent_under_three_days() {
        let scheduler = AutoRotationScheduler::new();
        scheduler.attach_schedule(KeyId::new(), RotationStrategy::TimeBased, 2);
        scheduler.attach_schedule(KeyId::new(), RotationStrategy::TimeBased, 6);
        scheduler.attach_schedule(KeyId::new(), RotationStrategy::TimeBased, 30);
        let due = scheduler.check_due_rotations();
        assert_eq!(due.len(), 2);
        assert!(due.iter().any(|(_, urgent)| *urgent));
    }
}
