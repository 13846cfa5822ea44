//! Memo domain model.
//!
//! # Responsibility
//! - Define the single persisted entity and its draft/patch input shape.
//! - Own the emptiness rule shared by create and update.
//!
//! # Invariants
//! - `id` is stable and never reused for another memo in one collection.
//! - `created_at` is stamped once and never rewritten.
//! - Committed memos have non-blank `title` and `content`.

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Display format used for `created_at`, e.g. `3/7/2026, 9:05:12 PM`.
const CREATED_AT_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Opaque memo identifier.
///
/// New ids are random UUID v4 strings. Older snapshots may carry numeric
/// (epoch millisecond) ids; those load as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoId(String);

impl MemoId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for MemoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MemoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for MemoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MemoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Ok(Self(value)),
            RawId::Integer(value) => Ok(Self(value.to_string())),
            RawId::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                Ok(Self(format!("{value:.0}")))
            }
            RawId::Float(value) => Err(serde::de::Error::custom(format!(
                "memo id must be a string or integer, got {value}"
            ))),
        }
    }
}

/// Validation failure for memo drafts and patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Content is empty after trimming.
    EmptyContent,
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "memo title must not be empty"),
            Self::EmptyContent => write!(f, "memo content must not be empty"),
        }
    }
}

impl Error for MemoValidationError {}

/// User-entered title/content pair used by both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoDraft {
    pub title: String,
    pub content: String,
}

impl MemoDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks the emptiness rule. Title is checked before content.
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        if self.title.trim().is_empty() {
            return Err(MemoValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(MemoValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// Canonical memo record.
///
/// Field names serialize in camelCase to keep the persisted snapshot
/// compatible with existing `smart-memos` data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    /// Missing or `null` in malformed records; treated as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Human-readable local time of creation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_important: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Memo {
    /// Builds a memo from a validated draft with a generated id and the
    /// current local time.
    pub fn from_draft(draft: MemoDraft) -> Result<Self, MemoValidationError> {
        Self::from_draft_at(draft, MemoId::generate(), Local::now())
    }

    /// Same as [`Memo::from_draft`] with caller-provided identity and clock.
    pub fn from_draft_at(
        draft: MemoDraft,
        id: MemoId,
        now: DateTime<Local>,
    ) -> Result<Self, MemoValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title,
            content: draft.content,
            created_at: format_created_at(now),
            is_important: false,
        })
    }

    /// Replaces title and content, leaving identity, timestamp and flag.
    pub fn apply_patch(&mut self, patch: MemoDraft) -> Result<(), MemoValidationError> {
        patch.validate()?;
        self.title = patch.title;
        self.content = patch.content;
        Ok(())
    }

    pub fn toggle_important(&mut self) {
        self.is_important = !self.is_important;
    }
}

/// Formats a timestamp the way memos display their creation time.
pub fn format_created_at(now: DateTime<Local>) -> String {
    now.format(CREATED_AT_FORMAT).to_string()
}
