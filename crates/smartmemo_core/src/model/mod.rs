//! Memo domain model.
//!
//! # Responsibility
//! - Define the canonical memo record and its input shapes.
//!
//! # Invariants
//! - Every memo is identified by a stable `MemoId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod memo;
