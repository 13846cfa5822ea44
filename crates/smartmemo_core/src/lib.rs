//! Core domain logic for Smart Memo.
//! This crate is the single source of truth for memo invariants and the
//! persisted snapshot format.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoDraft, MemoId, MemoValidationError};
pub use repo::kv_store::{FileKvStore, KvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::memo_repo::{MemoSnapshotRepository, MEMO_STORAGE_KEY};
pub use search::filter::filter_memos;
pub use service::memo_store::{MemoStore, MemoStoreError, StoreResult};

/// Application version reported by the desktop bridge, CLI and HTTP service.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
