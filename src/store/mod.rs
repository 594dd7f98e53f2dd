//! # In-memory per-user record store
//!
//! One `MemoryStore` instance per record kind, each a mutex-guarded map from
//! user id to that user's ordered sequence. Isolation between users is by
//! construction: every operation indexes the map with the caller's id, so no
//! code path can reach another user's sequence.
//!
//! New items go to the FRONT of the sequence (most recently created first);
//! updates keep their position. Everything lives in process memory and is
//! lost on restart.

pub mod records;

pub use records::{Programme, ProgrammeDraft, Script, ScriptDraft};

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

/// A record kind the store knows how to stamp and revise.
///
/// This trait is the seam between the router and storage: handlers only see
/// `list`/`create`/`update`/`delete`, so a database-backed store could
/// replace [`MemoryStore`] without touching routing code.
pub trait Record: Clone + Send + 'static {
    type Draft;

    /// Builds a fresh record from client-supplied fields.
    fn assemble(id: String, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn id(&self) -> &str;

    /// Replaces the mutable fields in place and stamps the revision time.
    fn revise(&mut self, draft: Self::Draft, updated_at: DateTime<Utc>);
}

#[derive(Debug)]
pub enum StoreError {
    /// The id is absent from the caller's own sequence.
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "no record with id {id}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Generates an id unique within the process lifetime: millisecond timestamp
/// prefix plus a random suffix. Uniqueness across restarts is not required.
pub fn new_record_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{:x}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}

/// Mutex-guarded map from user id to that user's record sequence.
///
/// The lock is held only across synchronous map operations — never across an
/// await point — so a hung provider call can't starve store access.
pub struct MemoryStore<R: Record> {
    entries: Mutex<HashMap<String, Vec<R>>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<R>>> {
        // A poisoned lock means a panic mid-mutation; the map itself is still
        // structurally sound, so keep serving.
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Returns the user's sequence, most recently created first. Never fails.
    pub fn list(&self, user_id: &str) -> Vec<R> {
        self.locked().get(user_id).cloned().unwrap_or_default()
    }

    /// Creates a record at the front of the user's sequence and returns it.
    pub fn create(&self, user_id: &str, draft: R::Draft) -> R {
        let record = R::assemble(new_record_id(), Utc::now(), draft);
        let mut entries = self.locked();
        let sequence = entries.entry(user_id.to_string()).or_default();
        sequence.insert(0, record.clone());
        debug!(
            "created record {} for user {} ({} total)",
            record.id(),
            user_id,
            sequence.len()
        );
        record
    }

    /// Replaces the mutable fields of the matching record, keeping its
    /// position in the sequence.
    pub fn update(&self, user_id: &str, id: &str, draft: R::Draft) -> Result<R, StoreError> {
        let mut entries = self.locked();
        let sequence = entries
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let record = sequence
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.revise(draft, Utc::now());
        Ok(record.clone())
    }

    /// Removes the matching record from the user's sequence.
    pub fn delete(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        let mut entries = self.locked();
        let sequence = entries
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let position = sequence
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        sequence.remove(position);
        debug!("deleted record {} for user {}", id, user_id);
        Ok(())
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProgrammeDraft {
        ProgrammeDraft {
            name: name.to_string(),
            genre: "drama".to_string(),
            target_audience: "general".to_string(),
            episode_length: "30 min".to_string(),
            style_references: vec![],
        }
    }

    #[test]
    fn test_list_is_empty_for_unknown_user() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        assert!(store.list("nobody").is_empty());
    }

    #[test]
    fn test_create_inserts_at_front() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        store.create("u1", draft("first"));
        store.create("u1", draft("second"));
        store.create("u1", draft("third"));

        let listed = store.list("u1");
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].name, "third");
        assert_eq!(listed[1].name, "second");
        assert_eq!(listed[2].name, "first");
    }

    #[test]
    fn test_ids_are_unique_within_process() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        let mut ids = std::collections::HashSet::new();
        for i in 0..200 {
            let record = store.create("u1", draft(&format!("p{i}")));
            assert!(ids.insert(record.id.clone()), "duplicate id {}", record.id);
        }
    }

    #[test]
    fn test_update_keeps_position_and_stamps_updated_at() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        store.create("u1", draft("a"));
        let target = store.create("u1", draft("b"));
        store.create("u1", draft("c"));

        let revised = store.update("u1", &target.id, draft("b2")).unwrap();
        assert_eq!(revised.name, "b2");
        assert!(revised.updated_at.is_some());

        let listed = store.list("u1");
        assert_eq!(listed[1].id, target.id);
        assert_eq!(listed[1].name, "b2");
    }

    #[test]
    fn test_update_missing_id_is_not_found_and_mutates_nothing() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        let existing = store.create("u1", draft("keep"));

        let err = store.update("u1", "missing", draft("changed")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let listed = store.list("u1");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "keep");
        assert_eq!(listed[0].id, existing.id);
        assert!(listed[0].updated_at.is_none());
    }

    #[test]
    fn test_delete_twice_second_is_not_found() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        let record = store.create("u1", draft("once"));

        assert!(store.delete("u1", &record.id).is_ok());
        let err = store.delete("u1", &record.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_cross_user_isolation() {
        let store: MemoryStore<Programme> = MemoryStore::new();
        let a = store.create("user-a", draft("a's show"));
        store.create("user-b", draft("b's show"));

        let b_list = store.list("user-b");
        assert_eq!(b_list.len(), 1);
        assert!(b_list.iter().all(|r| r.id != a.id));

        // B cannot touch A's record through their own sequence
        assert!(store.update("user-b", &a.id, draft("stolen")).is_err());
        assert!(store.delete("user-b", &a.id).is_err());
        assert_eq!(store.list("user-a")[0].name, "a's show");
    }
}
