//! Generic ordered, thread-safe record store.
//!
//! Every evaluator owns one or more of these: insertion order is the
//! store's natural order (satisfying the ordering guarantee in the
//! concurrency model), lookups by id are O(1) via a side index, and the
//! whole thing is `Send + Sync` so an orchestrator can hand out `Arc`
//! handles without re-architecting for a future concurrent daemon.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

pub trait Identified<Id> {
    fn id(&self) -> Id;
}

#[derive(Debug)]
pub struct RecordStore<Id, T> {
    records: RwLock<Vec<T>>,
    index: RwLock<HashMap<Id, usize>>,
}

impl<Id, T> Default for RecordStore<Id, T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            index: RwLock::new(HashMap::new()),
        }
    }
}

impl<Id, T> RecordStore<Id, T>
where
    Id: Eq + Hash + Copy,
    T: Identified<Id> + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, indexing it by its own id. Returns the position
    /// it was inserted at.
    pub fn insert(&self, record: T) -> usize {
        let id = record.id();
        let mut records = self.records.write().unwrap();
        let position = records.len();
        records.push(record);
        self.index.write().unwrap().insert(id, position);
        position
    }

    pub fn get(&self, id: Id) -> Option<T> {
        let index = self.index.read().unwrap();
        let position = *index.get(&id)?;
        self.records.read().unwrap().get(position).cloned()
    }

    /// Replaces the record at `id` in place, preserving its position
    /// (and therefore insertion order).
    pub fn update<F>(&self, id: Id, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let index = self.index.read().unwrap();
        let position = *index.get(&id)?;
        drop(index);
        let mut records = self.records.write().unwrap();
        let record = records.get_mut(position)?;
        mutate(record);
        Some(record.clone())
    }

    pub fn all(&self) -> Vec<T> {
        self.records.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the last `n` records in insertion order (oldest first).
    pub fn tail(&self, n: usize) -> Vec<T> {
        let records = self.records.read().unwrap();
        let start = records.len().saturating_sub(n);
        records[start..].to_vec()
    }

    /// Drops the oldest records until at most `limit` remain (FIFO
    /// truncation), rebuilding the index afterwards. Used by stores with
    /// a documented retention limit (e.g. the decision audit log).
    pub fn truncate_front(&self, limit: usize) {
        let mut records = self.records.write().unwrap();
        if records.len() <= limit {
            return;
        }
        let drop_count = records.len() - limit;
        records.drain(0..drop_count);
        let mut index = self.index.write().unwrap();
        index.clear();
        for (position, record) in records.iter().enumerate() {
            index.insert(record.id(), position);
        }
    }

    pub fn retain<F>(&self, keep: F)
    where
        F: Fn(&T) -> bool,
    {
        let mut records = self.records.write().unwrap();
        records.retain(|r| keep(r));
        let mut index = self.index.write().unwrap();
        index.clear();
        for (position, record) in records.iter().enumerate() {
            index.insert(record.id(), position);
        }
    }
}
