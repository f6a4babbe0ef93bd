//! Record store: the boundary to wherever signups are persisted.
//!
//! [`RecordStore`] has exactly two operations: list every record (newest
//! first) and insert one. There is no update or delete. [`MemoryStore`] is
//! the in-process implementation used by tests, demos, and the default
//! configuration; the hosted REST backend lives in `gigafter-store`.

use crate::error::StoreError;
use crate::types::{NewSignup, SignupId, SignupRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Async access to the signup table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name for logs ("memory", "rest", …).
    fn backend_tag(&self) -> &'static str;

    /// Every record, ordered by `created_at` descending.
    async fn list(&self) -> Result<Vec<SignupRecord>, StoreError>;

    /// Persist `signup`, returning the stored record with its assigned
    /// `id` and `created_at`.
    async fn insert(&self, signup: NewSignup) -> Result<SignupRecord, StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store. Ids are random v4 UUIDs; `created_at` is the insert
/// time.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<SignupRecord>>,
    fail_with: Option<StoreError>,
    inserts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with existing records (any order).
    pub fn with_records(records: Vec<SignupRecord>) -> Self {
        Self { records: RwLock::new(records), ..Self::default() }
    }

    /// A store whose every call fails with `err`.
    pub fn failing(err: StoreError) -> Self {
        Self { fail_with: Some(err), ..Self::default() }
    }

    /// Number of insert calls received, successful or not.
    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::Relaxed)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<SignupRecord>, StoreError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let mut records = self.records.read().await.clone();
        // Stable sort keeps insertion order among equal timestamps.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn insert(&self, signup: NewSignup) -> Result<SignupRecord, StoreError> {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let record = SignupRecord::from_new(
            SignupId(uuid::Uuid::new_v4().to_string()),
            Utc::now(),
            signup,
        );
        tracing::debug!(id = %record.id, "memory store: inserted signup");
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
