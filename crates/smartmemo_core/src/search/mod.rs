//! Memo query entry points.
//!
//! # Responsibility
//! - Provide the substring filter used to derive the visible memo list.

pub mod filter;
