//! In-memory record store.
//!
//! An append-only sequence of [`FeatureRecord`]s that lives for the whole
//! process. A single mutex guards both append and snapshot so concurrent
//! ingest requests never lose or interleave a write.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod record;

pub use record::FeatureRecord;

/// Append-only, unbounded record store shared across request handlers.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Mutex<Vec<FeatureRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` to the end of the sequence. Never fails.
    pub fn append(&self, record: FeatureRecord) {
        self.lock().push(record);
    }

    /// Owned snapshot of every record in insertion order.
    pub fn list_all(&self) -> Vec<FeatureRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-pushed Vec, so the
    // poisoned guard is still safe to use and ingest keeps working.
    fn lock(&self) -> MutexGuard<'_, Vec<FeatureRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
