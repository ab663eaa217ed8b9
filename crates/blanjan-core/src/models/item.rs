//! Shopping-list item model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A unique identifier for an item.
///
/// Ids are Unix-millisecond values bumped to stay strictly increasing, so
/// they serialize as plain JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wrap a raw id value
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw numeric value
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Next id given the last one handed out and the current time.
    ///
    /// Never returns an id less than or equal to `last`.
    #[must_use]
    pub fn next_after(last: Option<Self>, now_ms: i64) -> Self {
        match last {
            Some(last) if last.0 >= now_ms => Self(last.0.saturating_add(1)),
            _ => Self(now_ms),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A single shopping-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Trimmed, non-empty text
    pub text: String,
    /// Checked off
    pub completed: bool,
}

impl Item {
    /// Create a new, not yet completed item
    #[must_use]
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}
