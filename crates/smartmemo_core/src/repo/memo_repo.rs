//! Memo snapshot adapter over a key-value store.
//!
//! # Responsibility
//! - Encode/decode the whole memo collection under one fixed key.
//! - Turn unreadable or corrupt data into "no data" for the store.
//!
//! # Invariants
//! - Every save writes the full collection; there are no deltas.
//! - `load_memos` never returns an error.

use crate::model::memo::Memo;
use crate::repo::kv_store::{KvStore, RepoResult};
use log::{error, warn};

/// Storage key shared with earlier releases of the application.
pub const MEMO_STORAGE_KEY: &str = "smart-memos";

/// Persistent store adapter for the memo collection.
pub struct MemoSnapshotRepository<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> MemoSnapshotRepository<S> {
    /// Uses the default [`MEMO_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, MEMO_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Reads the raw snapshot text, `None` when the key was never written.
    pub fn load(&self) -> RepoResult<Option<String>> {
        self.store.get(&self.key)
    }

    /// Loads and decodes the collection with fail-open semantics.
    ///
    /// Returns `None` for a missing key, an unreadable backend, or a
    /// snapshot that does not decode as a memo array. Failures are logged.
    pub fn load_memos(&self) -> Option<Vec<Memo>> {
        let raw = match self.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                error!(
                    "event=memo_load module=repo status=error error_code=read_failed key={} error={err}",
                    self.key
                );
                return None;
            }
        };

        match decode_snapshot(&raw) {
            Ok(memos) => Some(memos),
            Err(err) => {
                warn!(
                    "event=memo_load module=repo status=error error_code=corrupt_snapshot key={} bytes={} error={err}",
                    self.key,
                    raw.len()
                );
                None
            }
        }
    }

    /// Serializes `memos` and overwrites the stored snapshot.
    pub fn save(&self, memos: &[Memo]) -> RepoResult<()> {
        let raw = encode_snapshot(memos)?;
        self.store.set(&self.key, &raw)
    }
}

/// Encodes the collection as a JSON array.
pub fn encode_snapshot(memos: &[Memo]) -> RepoResult<String> {
    Ok(serde_json::to_string(memos)?)
}

/// Decodes a JSON array of memos. `null` decodes as an empty collection.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Memo>, serde_json::Error> {
    let memos: Option<Vec<Memo>> = serde_json::from_str(raw)?;
    Ok(memos.unwrap_or_default())
}
