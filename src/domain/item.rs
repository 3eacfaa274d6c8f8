use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Maximum item text length, enforced by the input surface (the store only
/// rejects empty text).
pub const MAX_TEXT_LEN: usize = 100;

/// Unique identifier for a to-do item.
///
/// Assigned monotonically from the store's counter, starting at 1. An id is
/// never reused, even after the item it named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new ItemId from a counter value
    pub fn new(counter: u64) -> Self {
        Self(counter)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for ItemId {
    type Err = crate::error::ListaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::error::ListaError::InvalidItemId(s.to_string()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new item with the given ID and text
    pub fn new(id: ItemId, text: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            text,
            complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the text. Never touches the completion flag.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.updated_at = Utc::now();
    }

    /// Flips the completion flag and returns the new value. Never touches
    /// the text.
    pub fn toggle_complete(&mut self) -> bool {
        self.complete = !self.complete;
        self.updated_at = Utc::now();
        self.complete
    }

    /// Case-insensitive substring match against the item text. An empty
    /// query matches every item.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.text.to_lowercase().contains(&query.to_lowercase())
    }
}
