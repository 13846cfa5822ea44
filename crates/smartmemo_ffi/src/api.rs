//! Desktop shell bridge API.
//!
//! # Responsibility
//! - Expose the application version and memo use-cases to the host UI via FRB.
//! - Fold every failure into a response envelope.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Each call opens the configured database, runs one store operation and
//!   releases the connection; the snapshot is the only state shared between
//!   calls.
//! - Calls are serialized in-process so a load/mutate/save cycle is never
//!   interleaved with another host thread's cycle.

use log::error;
use smartmemo_core::db::open_db;
use smartmemo_core::{
    core_version, init_logging as init_logging_inner, AppConfig, Memo, MemoDraft, MemoId,
    MemoStore, SqliteKvStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static BRIDGE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static BRIDGE_LOCK: Mutex<()> = Mutex::new(());

/// Returns the application version string shown by the host UI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn app_version() -> String {
    core_version().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling logs.
/// - Idempotent for the same `level + log_dir`; conflicting calls fail.
/// - Returns an empty string on success, the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Memo projection handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub is_important: bool,
}

impl From<&Memo> for MemoItem {
    fn from(memo: &Memo) -> Self {
        Self {
            id: memo.id.to_string(),
            title: memo.title.clone(),
            content: memo.content.clone(),
            created_at: memo.created_at.clone(),
            is_important: memo.is_important,
        }
    }
}

/// Visible memo list for the current search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoListResponse {
    /// Filtered memos, newest first.
    pub items: Vec<MemoItem>,
    /// Size of the unfiltered collection.
    pub total: u32,
    /// Diagnostics message; empty on success.
    pub message: String,
}

/// Result envelope for single-memo operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoActionResponse {
    pub ok: bool,
    /// Affected memo after the operation, when one exists.
    pub memo: Option<MemoItem>,
    pub message: String,
}

impl MemoActionResponse {
    fn success(message: impl Into<String>, memo: Option<&Memo>) -> Self {
        Self {
            ok: true,
            memo: memo.map(MemoItem::from),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            memo: None,
            message: message.into(),
        }
    }
}

/// Lists memos whose title or content contains `search` (case-insensitive).
///
/// # FFI contract
/// - Sync call, DB-backed.
/// - Empty `search` returns the whole collection.
#[flutter_rust_bridge::frb(sync)]
pub fn memo_list(search: String) -> MemoListResponse {
    match with_memo_store(|store| {
        let items: Vec<MemoItem> = store
            .filter(search.as_str())
            .into_iter()
            .map(MemoItem::from)
            .collect();
        (items, store.len())
    }) {
        Ok((items, total)) => MemoListResponse {
            items,
            total: u32::try_from(total).unwrap_or(u32::MAX),
            message: String::new(),
        },
        Err(err) => MemoListResponse {
            items: Vec::new(),
            total: 0,
            message: format!("memo_list failed: {err}"),
        },
    }
}

/// Fetches one memo, e.g. to prefill the edit form.
#[flutter_rust_bridge::frb(sync)]
pub fn memo_get(id: String) -> MemoActionResponse {
    let id = MemoId::from(id);
    respond("memo_get", |store| match store.get(&id) {
        Some(memo) => MemoActionResponse::success("", Some(memo)),
        None => MemoActionResponse::failure(format!("memo not found: {id}")),
    })
}

/// Creates a memo from the form draft.
#[flutter_rust_bridge::frb(sync)]
pub fn memo_create(title: String, content: String) -> MemoActionResponse {
    respond("memo_create", |store| {
        match store.create(MemoDraft::new(title, content)) {
            Ok(memo) => with_write_status(store, "Memo created.", Some(&memo)),
            Err(err) => MemoActionResponse::failure(err.to_string()),
        }
    })
}

/// Replaces title and content of an existing memo.
#[flutter_rust_bridge::frb(sync)]
pub fn memo_update(id: String, title: String, content: String) -> MemoActionResponse {
    let id = MemoId::from(id);
    respond("memo_update", |store| {
        match store.update(&id, MemoDraft::new(title, content)) {
            Ok(memo) => with_write_status(store, "Memo updated.", Some(&memo)),
            Err(err) => MemoActionResponse::failure(err.to_string()),
        }
    })
}

/// Deletes a memo. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn memo_delete(id: String) -> MemoActionResponse {
    let id = MemoId::from(id);
    respond("memo_delete", |store| {
        if store.delete(&id) {
            with_write_status(store, "Memo deleted.", None)
        } else {
            MemoActionResponse::success("Nothing to delete.", None)
        }
    })
}

/// Flips the important flag. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn memo_toggle_important(id: String) -> MemoActionResponse {
    let id = MemoId::from(id);
    respond("memo_toggle_important", |store| {
        match store.toggle_important(&id) {
            Some(memo) => with_write_status(store, "Memo updated.", Some(&memo)),
            None => MemoActionResponse::success("Nothing to update.", None),
        }
    })
}

type BridgeStore<'conn> = MemoStore<SqliteKvStore<'conn>>;

fn respond(
    op: &str,
    f: impl FnOnce(&mut BridgeStore<'_>) -> MemoActionResponse,
) -> MemoActionResponse {
    with_memo_store(f)
        .unwrap_or_else(|err| MemoActionResponse::failure(format!("{op} failed: {err}")))
}

/// A committed change whose snapshot write failed is still `ok`; the message
/// tells the UI the change may not survive a restart.
fn with_write_status(
    store: &BridgeStore<'_>,
    message: &str,
    memo: Option<&Memo>,
) -> MemoActionResponse {
    match store.last_write_failure() {
        None => MemoActionResponse::success(message, memo),
        Some(err) => MemoActionResponse::success(format!("{message} Not saved: {err}"), memo),
    }
}

fn with_memo_store<T>(f: impl FnOnce(&mut BridgeStore<'_>) -> T) -> Result<T, String> {
    // A panic in another call cannot corrupt `()`; keep serving.
    let _guard = BRIDGE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let db_path = resolve_bridge_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("cannot create `{}`: {err}", parent.display()))?;
    }
    let conn = open_db(&db_path).map_err(|err| {
        error!(
            "event=bridge_call module=ffi status=error error_code=db_open_failed path={}",
            db_path.display()
        );
        format!("memo DB open failed: {err}")
    })?;
    let mut store = MemoStore::initialize(SqliteKvStore::new(&conn));
    Ok(f(&mut store))
}

fn resolve_bridge_db_path() -> PathBuf {
    BRIDGE_DB_PATH
        .get_or_init(|| AppConfig::from_env().db_path)
        .clone()
}
