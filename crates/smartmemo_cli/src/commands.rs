//! Command handlers. Each renders to the provided writer so output stays
//! testable without a terminal.

use smartmemo_core::{KvStore, Memo, MemoDraft, MemoId, MemoStore};
use std::error::Error;
use std::io::Write;

pub type CmdResult = Result<(), Box<dyn Error>>;

pub fn list<S: KvStore>(store: &MemoStore<S>, search: &str, out: &mut impl Write) -> CmdResult {
    let visible = store.filter(search);
    if visible.is_empty() {
        writeln!(out, "No memos.")?;
        return Ok(());
    }
    let matched = visible.len();
    for memo in visible {
        write_summary(memo, out)?;
    }
    if !search.is_empty() {
        writeln!(out, "{matched} of {} memo(s) match.", store.len())?;
    }
    Ok(())
}

pub fn show<S: KvStore>(store: &MemoStore<S>, id: &str, out: &mut impl Write) -> CmdResult {
    let id = MemoId::from(id);
    let memo = store
        .get(&id)
        .ok_or_else(|| format!("memo not found: {id}"))?;
    write_summary(memo, out)?;
    writeln!(out)?;
    writeln!(out, "{}", memo.content)?;
    Ok(())
}

pub fn add<S: KvStore>(
    store: &mut MemoStore<S>,
    title: String,
    content: String,
    out: &mut impl Write,
) -> CmdResult {
    let memo = store.create(MemoDraft::new(title, content))?;
    writeln!(out, "Created {}", memo.id)?;
    warn_unsaved(store, out)
}

pub fn edit<S: KvStore>(
    store: &mut MemoStore<S>,
    id: &str,
    title: String,
    content: String,
    out: &mut impl Write,
) -> CmdResult {
    let memo = store.update(&MemoId::from(id), MemoDraft::new(title, content))?;
    writeln!(out, "Updated {}", memo.id)?;
    warn_unsaved(store, out)
}

pub fn remove<S: KvStore>(store: &mut MemoStore<S>, id: &str, out: &mut impl Write) -> CmdResult {
    if store.delete(&MemoId::from(id)) {
        writeln!(out, "Deleted {id}")?;
    } else {
        writeln!(out, "No memo {id}; nothing deleted")?;
    }
    warn_unsaved(store, out)
}

pub fn star<S: KvStore>(store: &mut MemoStore<S>, id: &str, out: &mut impl Write) -> CmdResult {
    match store.toggle_important(&MemoId::from(id)) {
        Some(memo) if memo.is_important => writeln!(out, "Starred {id}")?,
        Some(_) => writeln!(out, "Unstarred {id}")?,
        None => writeln!(out, "No memo {id}; nothing changed")?,
    }
    warn_unsaved(store, out)
}

fn write_summary(memo: &Memo, out: &mut impl Write) -> std::io::Result<()> {
    let marker = if memo.is_important { '*' } else { ' ' };
    writeln!(
        out,
        "{marker} {}  {}  [{}]",
        memo.id, memo.title, memo.created_at
    )
}

fn warn_unsaved<S: KvStore>(store: &MemoStore<S>, out: &mut impl Write) -> CmdResult {
    if let Some(err) = store.last_write_failure() {
        writeln!(out, "warning: change not saved: {err}")?;
    }
    Ok(())
}
