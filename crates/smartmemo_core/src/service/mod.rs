//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model validation and snapshot persistence into the
//!   operations presentation layers call.
//! - Keep CLI/FFI consumers decoupled from storage details.

pub mod memo_store;
