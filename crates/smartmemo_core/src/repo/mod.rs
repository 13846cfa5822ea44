//! Persistence layer: key-value backends and the memo snapshot adapter.
//!
//! # Responsibility
//! - Define the key-value contract the memo store persists through.
//! - Isolate SQLite and file-system details from store orchestration.
//!
//! # Invariants
//! - Backends report transport failures as `RepoError`; decoding policy
//!   (fail-open) lives in `memo_repo`, not in backends.

pub mod kv_store;
pub mod memo_repo;
