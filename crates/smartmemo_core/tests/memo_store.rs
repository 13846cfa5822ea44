use smartmemo_core::db::open_db_in_memory;
use smartmemo_core::{
    KvStore, MemoDraft, MemoId, MemoStore, MemoStoreError, MemoValidationError, RepoError,
    RepoResult, SqliteKvStore, MEMO_STORAGE_KEY,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// In-memory store that counts writes.
#[derive(Default)]
struct CountingStore {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl KvStore for CountingStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.writes.set(self.writes.get() + 1);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store whose writes can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: CountingStore,
    failing: Cell<bool>,
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.failing.get() {
            return Err(RepoError::Io(std::io::Error::other("quota exceeded")));
        }
        self.inner.set(key, value)
    }
}

fn titles<S: KvStore>(store: &MemoStore<S>) -> Vec<&str> {
    store.memos().iter().map(|memo| memo.title.as_str()).collect()
}

#[test]
fn initialize_on_missing_key_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = MemoStore::initialize(SqliteKvStore::new(&conn));
    assert!(store.is_empty());
}

#[test]
fn initialize_on_corrupt_snapshot_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    kv.set(MEMO_STORAGE_KEY, "{not json").unwrap();

    let store = MemoStore::initialize(kv);
    assert!(store.is_empty());
}

#[test]
fn create_prepends_and_assigns_unique_ids() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);

    let mut ids = HashSet::new();
    for i in 0..50 {
        let memo = store
            .create(MemoDraft::new(format!("t{i}"), "body"))
            .unwrap();
        assert!(!memo.is_important);
        assert_eq!(store.memos()[0], memo);
        assert!(ids.insert(memo.id.clone()), "duplicate id {}", memo.id);
    }
    assert_eq!(store.len(), 50);
    assert_eq!(backing.writes.get(), 50);
}

#[test]
fn invalid_drafts_are_rejected_without_writing() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);
    let kept = store.create(MemoDraft::new("keep", "me")).unwrap();
    let writes_before = backing.writes.get();

    let err = store.create(MemoDraft::new("   ", "body")).unwrap_err();
    assert_eq!(
        err,
        MemoStoreError::Validation(MemoValidationError::EmptyTitle)
    );
    let err = store.create(MemoDraft::new("title", "")).unwrap_err();
    assert_eq!(
        err,
        MemoStoreError::Validation(MemoValidationError::EmptyContent)
    );
    let err = store
        .update(&kept.id, MemoDraft::new("title", " \n "))
        .unwrap_err();
    assert!(matches!(err, MemoStoreError::Validation(_)));

    assert_eq!(store.memos(), &[kept]);
    assert_eq!(backing.writes.get(), writes_before);
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);
    let missing = MemoId::from("missing");

    let err = store
        .update(&missing, MemoDraft::new("t", "c"))
        .unwrap_err();
    assert_eq!(err, MemoStoreError::NotFound(missing));
    assert_eq!(backing.writes.get(), 0);
}

#[test]
fn toggle_twice_restores_flag() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);
    let memo = store.create(MemoDraft::new("t", "c")).unwrap();

    assert!(store.toggle_important(&memo.id).unwrap().is_important);
    assert!(!store.toggle_important(&memo.id).unwrap().is_important);
    assert_eq!(store.get(&memo.id), Some(&memo));
}

#[test]
fn toggle_of_unknown_id_is_silent_noop() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);
    store.create(MemoDraft::new("t", "c")).unwrap();

    assert!(store.toggle_important(&MemoId::from("nope")).is_none());
    assert_eq!(backing.writes.get(), 1);
}

#[test]
fn delete_is_idempotent() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);
    let a = store.create(MemoDraft::new("a", "x")).unwrap();
    let b = store.create(MemoDraft::new("b", "y")).unwrap();

    assert!(store.delete(&a.id));
    let after_first = store.memos().to_vec();
    let writes = backing.writes.get();

    assert!(!store.delete(&a.id));
    assert_eq!(store.memos(), after_first.as_slice());
    assert_eq!(store.memos(), &[b]);
    assert_eq!(backing.writes.get(), writes);
}

#[test]
fn end_to_end_scenario() {
    let conn = open_db_in_memory().unwrap();
    let mut store = MemoStore::initialize(SqliteKvStore::new(&conn));

    let a = store.create(MemoDraft::new("A", "x")).unwrap();
    let b = store.create(MemoDraft::new("B", "y")).unwrap();
    assert_eq!(titles(&store), ["B", "A"]);

    let a2 = store.update(&a.id, MemoDraft::new("A2", "x")).unwrap();
    assert_eq!(titles(&store), ["B", "A2"]);
    assert_eq!(a2.id, a.id);
    assert_eq!(a2.created_at, a.created_at);

    let toggled = store.toggle_important(&b.id).unwrap();
    assert!(toggled.is_important);
    assert!(store.get(&b.id).unwrap().is_important);

    assert!(store.delete(&a2.id));
    assert_eq!(titles(&store), ["B"]);

    // A fresh store over the same database sees the last snapshot.
    let reloaded = MemoStore::initialize(SqliteKvStore::new(&conn));
    assert_eq!(reloaded.memos(), store.memos());
}

#[test]
fn write_failure_keeps_session_usable_and_is_reported() {
    let backing = FlakyStore::default();
    let mut store = MemoStore::initialize(&backing);
    store.create(MemoDraft::new("saved", "1")).unwrap();

    backing.failing.set(true);
    let unsaved = store.create(MemoDraft::new("unsaved", "2")).unwrap();
    assert_eq!(store.memos()[0], unsaved);
    assert!(store
        .last_write_failure()
        .unwrap()
        .contains("quota exceeded"));

    backing.failing.set(false);
    store.toggle_important(&unsaved.id).unwrap();
    assert!(store.last_write_failure().is_none());

    let reloaded = MemoStore::initialize(&backing);
    assert_eq!(reloaded.memos(), store.memos());
}

#[test]
fn duplicate_ids_in_snapshot_are_rekeyed_on_load() {
    let backing = CountingStore::default();
    backing
        .set(
            MEMO_STORAGE_KEY,
            r#"[
                {"id":1700000000000,"title":"a","content":"x","createdAt":"c","isImportant":false},
                {"id":1700000000000,"title":"b","content":"y","createdAt":"c","isImportant":true}
            ]"#,
        )
        .unwrap();

    let store = MemoStore::initialize(&backing);
    assert_eq!(store.len(), 2);
    assert_eq!(store.memos()[0].id.as_str(), "1700000000000");
    assert_ne!(store.memos()[0].id, store.memos()[1].id);
    assert_eq!(store.memos()[1].title, "b");
}

#[test]
fn rekeyed_ids_are_stable_across_reloads() {
    let backing = CountingStore::default();
    backing
        .set(
            MEMO_STORAGE_KEY,
            r#"[
                {"id":1,"title":"a","content":"x","createdAt":"c","isImportant":false},
                {"id":1,"title":"b","content":"y","createdAt":"c","isImportant":false}
            ]"#,
        )
        .unwrap();
    let writes_before = backing.writes.get();

    let shown_id = MemoStore::initialize(&backing).memos()[1].id.clone();
    assert_eq!(backing.writes.get(), writes_before + 1);

    let mut next = MemoStore::initialize(&backing);
    assert_eq!(next.memos()[1].id, shown_id);
    assert_eq!(backing.writes.get(), writes_before + 1);
    assert!(next.toggle_important(&shown_id).unwrap().is_important);
    let updated = next.update(&shown_id, MemoDraft::new("b2", "y")).unwrap();
    assert_eq!(updated.id, shown_id);
}

#[test]
fn filter_pass_through_uses_current_collection() {
    let backing = CountingStore::default();
    let mut store = MemoStore::initialize(&backing);
    store.create(MemoDraft::new("Groceries", "milk")).unwrap();
    store.create(MemoDraft::new("Work", "Milk the deadline")).unwrap();
    store.create(MemoDraft::new("Ideas", "none")).unwrap();

    let hits: Vec<&str> = store
        .filter("MILK")
        .into_iter()
        .map(|memo| memo.title.as_str())
        .collect();
    assert_eq!(hits, ["Work", "Groceries"]);
    assert_eq!(store.filter("").len(), 3);
}
