//! Todo list store.
//!
//! # Responsibility
//! - Own the in-memory item list for one session.
//! - Persist the full list to a durable slot after every mutation.
//!
//! # Invariants
//! - Item ids are unique within the list.
//! - New items go to the front; no operation reorders existing items.
//! - The in-memory list always equals the last successfully saved list:
//!   a failed save rolls the mutation back.
//! - Unreadable or corrupt slot contents load as an empty list.

use crate::model::todo::{Todo, TodoId};
use crate::slot::{SlotError, TodoSlot};
use log::{error, info, warn};
use std::collections::HashSet;

/// Slot key used when the caller does not pick one.
pub const STORAGE_KEY: &str = "todo-app-data";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo text must not be blank")]
    BlankText,
    #[error("failed to serialize todos: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to persist todos: {0}")]
    Persist(#[from] SlotError),
}

/// Session-scoped owner of the todo list.
pub struct TodoStore<S: TodoSlot> {
    slot: S,
    key: String,
    todos: Vec<Todo>,
}

impl<S: TodoSlot> TodoStore<S> {
    /// Opens the store on `slot` under [`STORAGE_KEY`] and loads its contents.
    pub fn open(slot: S) -> Self {
        Self::open_with_key(slot, STORAGE_KEY)
    }

    pub fn open_with_key(slot: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            slot,
            key: key.into(),
            todos: Vec::new(),
        };
        store.reload();
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Current list, newest first.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id() == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Reads the persisted list from the slot.
    ///
    /// Never fails: a missing slot, a read error and an unparseable blob all
    /// yield an empty list. Duplicate ids keep their first occurrence.
    pub fn load(&self) -> Vec<Todo> {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=todo_load module=store status=error error_code=slot_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        let parsed: Vec<Todo> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    "event=todo_load module=store status=error error_code=corrupt_blob bytes={} error={err}",
                    raw.len()
                );
                return Vec::new();
            }
        };

        let total = parsed.len();
        let mut seen = HashSet::with_capacity(total);
        let todos: Vec<Todo> = parsed
            .into_iter()
            .filter(|todo| seen.insert(todo.id().clone()))
            .collect();
        if todos.len() != total {
            warn!(
                "event=todo_load module=store status=degraded dropped_duplicates={}",
                total - todos.len()
            );
        }

        info!("event=todo_load module=store status=ok count={}", todos.len());
        todos
    }

    /// Replaces the in-memory list with the slot contents.
    pub fn reload(&mut self) {
        self.todos = self.load();
    }

    /// Serializes `items` and overwrites the slot in a single write.
    pub fn save(&self, items: &[Todo]) -> StoreResult<()> {
        let blob = serde_json::to_string(items)?;
        if let Err(err) = self.slot.write(&self.key, &blob) {
            error!(
                "event=todo_save module=store status=error error_code=slot_write_failed count={} error={err}",
                items.len()
            );
            return Err(err.into());
        }
        Ok(())
    }

    /// Adds a new open item at the front of the list.
    ///
    /// `text` is trimmed; blank input is rejected with
    /// [`StoreError::BlankText`] and nothing is created.
    pub fn add(&mut self, text: &str) -> StoreResult<Todo> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::BlankText);
        }

        let todo = Todo::new(self.fresh_id(), text);
        self.todos.insert(0, todo.clone());
        if let Err(err) = self.save(&self.todos) {
            self.todos.remove(0);
            return Err(err);
        }

        info!(
            "event=todo_add module=store status=ok id={} count={}",
            todo.id(),
            self.todos.len()
        );
        Ok(todo)
    }

    /// Flips the completion flag of `id` in place.
    ///
    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn toggle(&mut self, id: &TodoId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        self.todos[index].toggle();
        if let Err(err) = self.save(&self.todos) {
            self.todos[index].toggle();
            return Err(err);
        }

        info!(
            "event=todo_toggle module=store status=ok id={id} completed={}",
            self.todos[index].is_completed()
        );
        Ok(true)
    }

    /// Removes `id`, keeping the relative order of the remaining items.
    ///
    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn delete(&mut self, id: &TodoId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.todos.remove(index);
        if let Err(err) = self.save(&self.todos) {
            self.todos.insert(index, removed);
            return Err(err);
        }

        info!(
            "event=todo_delete module=store status=ok id={id} count={}",
            self.todos.len()
        );
        Ok(true)
    }

    fn position(&self, id: &TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id() == id)
    }

    fn fresh_id(&self) -> TodoId {
        loop {
            let id = TodoId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}
