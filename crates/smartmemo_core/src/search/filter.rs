//! Case-insensitive substring filter over memo collections.
//!
//! # Invariants
//! - Output preserves input order and never contains memos not in input.
//! - Blank terms (empty string) select everything.
//! - Matching is plain substring containment on title or content.

use crate::model::memo::Memo;

/// Returns the memos whose title or content contains `term`, ignoring case.
///
/// Borrowing keeps the result a read-only view of the caller's collection.
pub fn filter_memos<'a>(memos: &'a [Memo], term: &str) -> Vec<&'a Memo> {
    if term.is_empty() {
        return memos.iter().collect();
    }

    let needle = term.to_lowercase();
    memos
        .iter()
        .filter(|memo| matches_term(memo, &needle))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_term(memo: &Memo, needle: &str) -> bool {
    memo.title.to_lowercase().contains(needle) || memo.content.to_lowercase().contains(needle)
}
