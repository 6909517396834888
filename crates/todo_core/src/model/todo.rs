//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical item record persisted in the durable slot.
//! - Keep identity, text and creation time immutable after construction.
//!
//! # Invariants
//! - `id` is never reused for another item within one list.
//! - `text` is non-blank for items created through `TodoStore::add`.
//! - Only `completed` changes over an item's lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identity token for a todo item.
///
/// Stored as a plain string on the wire so blobs written by other clients
/// (for example millisecond timestamps rendered as strings) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single task record.
///
/// Serialized with camelCase field names (`createdAt`) to match the durable
/// slot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates an open item stamped with the current time.
    ///
    /// Does not validate `text`; blank rejection happens in `TodoStore::add`.
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self::with_created_at(id, text, Utc::now())
    }

    /// Creates an open item with a caller-provided creation time.
    ///
    /// Used by import paths and tests where the timestamp already exists.
    pub fn with_created_at(id: TodoId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips the completion flag. Store-internal so every flip is persisted.
    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoId};

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TodoId::generate(), TodoId::generate());
    }

    #[test]
    fn toggle_only_changes_completion() {
        let mut todo = Todo::new(TodoId::from("a"), "water plants");
        let before = todo.clone();

        todo.toggle();
        assert!(todo.is_completed());
        assert_eq!(todo.id(), before.id());
        assert_eq!(todo.text(), before.text());
        assert_eq!(todo.created_at(), before.created_at());

        todo.toggle();
        assert_eq!(todo, before);
    }
}
