//! Host bridge for the Smart Memo desktop shell.

pub mod api;
