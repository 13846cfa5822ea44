//! Memo store: the owned, authoritative memo collection.
//!
//! # Responsibility
//! - Load the collection once and own it for the process lifetime.
//! - Validate and apply create/update/delete/toggle mutations.
//! - Persist a full snapshot after every effective mutation.
//!
//! # Invariants
//! - Collection order is newest-first by insertion; never re-sorted.
//! - Ids are unique within the collection.
//! - Rejected mutations leave the collection untouched and write nothing.
//! - A failed write never rolls back the in-memory change; it is logged and
//!   kept as `last_write_failure` until the next successful write.

use crate::model::memo::{Memo, MemoDraft, MemoId, MemoValidationError};
use crate::repo::kv_store::KvStore;
use crate::repo::memo_repo::MemoSnapshotRepository;
use crate::search::filter::filter_memos;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, MemoStoreError>;

/// Error for memo store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoStoreError {
    /// Draft or patch failed the emptiness rule.
    Validation(MemoValidationError),
    /// Update targeted an id that is not in the collection.
    NotFound(MemoId),
}

impl Display for MemoStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "memo not found: {id}"),
        }
    }
}

impl Error for MemoStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<MemoValidationError> for MemoStoreError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Owned memo collection synchronized to a key-value store.
pub struct MemoStore<S: KvStore> {
    repo: MemoSnapshotRepository<S>,
    memos: Vec<Memo>,
    last_write_failure: Option<String>,
}

impl<S: KvStore> MemoStore<S> {
    /// Loads the collection from `store` under the default key.
    ///
    /// Missing, unreadable or corrupt data all yield an empty collection.
    pub fn initialize(store: S) -> Self {
        Self::initialize_with(MemoSnapshotRepository::new(store))
    }

    /// Loads the collection through an explicitly configured adapter.
    ///
    /// Duplicate ids are replaced and the repaired snapshot is written back.
    pub fn initialize_with(repo: MemoSnapshotRepository<S>) -> Self {
        let started_at = Instant::now();
        let mut memos = repo.load_memos().unwrap_or_default();
        let rekeyed = rekey_duplicate_ids(&mut memos);
        if rekeyed > 0 {
            warn!("event=memo_init module=store status=ok duplicate_ids_rekeyed={rekeyed}");
        }
        info!(
            "event=memo_init module=store status=ok count={} duration_ms={}",
            memos.len(),
            started_at.elapsed().as_millis()
        );

        let mut store = Self {
            repo,
            memos,
            last_write_failure: None,
        };
        // Re-keyed ids must survive the next load so callers can address them.
        if rekeyed > 0 {
            store.persist("rekey");
        }
        store
    }

    /// Current collection, newest first.
    pub fn memos(&self) -> &[Memo] {
        self.memos.as_slice()
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    /// Looks up one memo, e.g. to prefill an edit form.
    pub fn get(&self, id: &MemoId) -> Option<&Memo> {
        self.memos.iter().find(|memo| &memo.id == id)
    }

    /// Filtered read-only view; empty `term` returns everything.
    pub fn filter(&self, term: &str) -> Vec<&Memo> {
        filter_memos(&self.memos, term)
    }

    /// Message of the most recent failed snapshot write, if it has not been
    /// superseded by a successful one.
    pub fn last_write_failure(&self) -> Option<&str> {
        self.last_write_failure.as_deref()
    }

    /// Creates a memo at the front of the collection.
    pub fn create(&mut self, draft: MemoDraft) -> StoreResult<Memo> {
        let mut memo = Memo::from_draft(draft)?;
        while self.get(&memo.id).is_some() {
            memo.id = MemoId::generate();
        }

        self.memos.insert(0, memo.clone());
        debug!("event=memo_create module=store status=ok id={}", memo.id);
        self.persist("create");
        Ok(memo)
    }

    /// Replaces title and content of an existing memo.
    ///
    /// Existence is checked before validation so callers editing a memo that
    /// vanished get `NotFound` rather than a form error.
    pub fn update(&mut self, id: &MemoId, patch: MemoDraft) -> StoreResult<Memo> {
        let memo = self
            .memos
            .iter_mut()
            .find(|memo| &memo.id == id)
            .ok_or_else(|| MemoStoreError::NotFound(id.clone()))?;
        memo.apply_patch(patch)?;
        let updated = memo.clone();

        debug!("event=memo_update module=store status=ok id={id}");
        self.persist("update");
        Ok(updated)
    }

    /// Removes a memo. Returns whether anything was removed; absent ids are
    /// a no-op and do not write.
    pub fn delete(&mut self, id: &MemoId) -> bool {
        let before = self.memos.len();
        self.memos.retain(|memo| &memo.id != id);
        if self.memos.len() == before {
            debug!("event=memo_delete module=store status=noop id={id}");
            return false;
        }

        debug!("event=memo_delete module=store status=ok id={id}");
        self.persist("delete");
        true
    }

    /// Flips the important flag. Absent ids are a silent no-op.
    pub fn toggle_important(&mut self, id: &MemoId) -> Option<Memo> {
        let Some(memo) = self.memos.iter_mut().find(|memo| &memo.id == id) else {
            debug!("event=memo_toggle module=store status=noop id={id}");
            return None;
        };
        memo.toggle_important();
        let toggled = memo.clone();

        debug!(
            "event=memo_toggle module=store status=ok id={id} important={}",
            toggled.is_important
        );
        self.persist("toggle");
        Some(toggled)
    }

    fn persist(&mut self, op: &'static str) {
        match self.repo.save(&self.memos) {
            Ok(()) => self.last_write_failure = None,
            Err(err) => {
                error!(
                    "event=memo_persist module=store status=error op={op} count={} error={err}",
                    self.memos.len()
                );
                self.last_write_failure = Some(err.to_string());
            }
        }
    }
}

/// Gives every repeated id after its first occurrence a fresh id.
fn rekey_duplicate_ids(memos: &mut [Memo]) -> usize {
    let mut seen = HashSet::with_capacity(memos.len());
    let mut rekeyed = 0;
    for memo in memos.iter_mut() {
        if seen.contains(&memo.id) {
            let mut fresh = MemoId::generate();
            while seen.contains(&fresh) {
                fresh = MemoId::generate();
            }
            memo.id = fresh;
            rekeyed += 1;
        }
        seen.insert(memo.id.clone());
    }
    rekeyed
}
