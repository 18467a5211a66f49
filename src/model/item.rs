use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Opaque, stable identity of a todo item. Survives text edits and
/// position shifts caused by deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Ulid);

impl ItemId {
    pub fn new() -> Self {
        ItemId(Ulid::new())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single line on the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: ItemId,
    pub text: String,
    #[serde(rename = "isDone", default)]
    pub is_done: bool,
}

impl TodoItem {
    /// New, not-done item with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        TodoItem {
            id: ItemId::new(),
            text: text.into(),
            is_done: false,
        }
    }
}
