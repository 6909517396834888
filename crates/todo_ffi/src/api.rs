//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the todo store to Dart via FRB as sync, list-returning calls.
//! - Hold one session store per process so every UI event sees the same list.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized through the session lock, one UI event at a time.

use log::{error, warn};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;
use todo_core::{
    core_version as core_version_inner, flush_due, init_logging as init_logging_inner,
    ping as ping_inner, RemovalSchedule, SqliteSlot, StoreError, Todo, TodoId, TodoStore,
};

const TODO_DB_FILE_NAME: &str = "todo_list.sqlite3";

struct Session {
    store: TodoStore<SqliteSlot>,
    removals: RemovalSchedule,
}

static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();
static TODO_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Todo item as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Response envelope for list mutations.
///
/// `items` always carries the full current list so the UI can re-render
/// without a second call; it is empty when the session could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id affected by the operation, when one exists.
    pub todo_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Current list, newest first.
    pub items: Vec<TodoItem>,
}

/// Returns the current list, newest first.
///
/// # FFI contract
/// - Returns an empty list when the session store cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> Vec<TodoItem> {
    with_session(|session| Ok(to_items(session.store.todos()))).unwrap_or_default()
}

/// Adds an item from raw input text.
///
/// # FFI contract
/// - Blank or whitespace-only text returns `ok=false` and creates nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(text: String) -> TodoActionResponse {
    respond(|session| match session.store.add(&text) {
        Ok(todo) => Ok((Some(todo.id().to_string()), "Todo added.".to_string())),
        Err(StoreError::BlankText) => Err("Todo text is empty.".to_string()),
        Err(err) => Err(format!("todo_add failed: {err}")),
    })
}

/// Flips completion of `id`. Unknown ids succeed with no change.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: String) -> TodoActionResponse {
    let id = TodoId::from(id);
    respond(|session| match session.store.toggle(&id) {
        Ok(true) => Ok((Some(id.to_string()), "Todo updated.".to_string())),
        Ok(false) => Ok((None, "No matching todo.".to_string())),
        Err(err) => Err(format!("todo_toggle failed: {err}")),
    })
}

/// Removes `id` immediately. Unknown ids succeed with no change.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: String) -> TodoActionResponse {
    let id = TodoId::from(id);
    respond(|session| {
        session.removals.cancel(&id);
        match session.store.delete(&id) {
            Ok(true) => Ok((Some(id.to_string()), "Todo deleted.".to_string())),
            Ok(false) => Ok((None, "No matching todo.".to_string())),
            Err(err) => Err(format!("todo_delete failed: {err}")),
        }
    })
}

/// Marks `id` for removal after the exit animation delay.
///
/// The item stays in the list (and can still be toggled) until a later
/// `todo_flush_removals` call finds it due.
///
/// # FFI contract
/// - Returns `false` for unknown ids and ids already marked.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_request_delete(id: String) -> bool {
    let id = TodoId::from(id);
    with_session(|session| {
        if session.store.get(&id).is_none() {
            return Ok(false);
        }
        Ok(session.removals.mark(id, Instant::now()))
    })
    .unwrap_or(false)
}

/// Deletes every item whose removal delay has elapsed.
///
/// Returns the removed ids; the UI re-renders from `todo_list` afterwards.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_flush_removals() -> Vec<String> {
    with_session(|session| {
        flush_due(&mut session.store, &mut session.removals, Instant::now())
            .map(|removed| removed.iter().map(TodoId::to_string).collect())
            .map_err(|err| format!("todo_flush_removals failed: {err}"))
    })
    .unwrap_or_else(|err| {
        warn!("event=ffi_flush module=ffi status=error error={err}");
        Vec::new()
    })
}

fn respond(
    f: impl FnOnce(&mut Session) -> Result<(Option<String>, String), String>,
) -> TodoActionResponse {
    let outcome = with_session(|session| {
        let result = f(session);
        Ok((result, to_items(session.store.todos())))
    });

    match outcome {
        Ok((Ok((todo_id, message)), items)) => TodoActionResponse {
            ok: true,
            todo_id,
            message,
            items,
        },
        Ok((Err(message), items)) => TodoActionResponse {
            ok: false,
            todo_id: None,
            message,
            items,
        },
        Err(message) => TodoActionResponse {
            ok: false,
            todo_id: None,
            message,
            items: Vec::new(),
        },
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, String>) -> Result<T, String> {
    let mut guard = lock_session();
    if guard.is_none() {
        *guard = Some(open_session()?);
    }
    match guard.as_mut() {
        Some(session) => f(session),
        None => Err("todo session unavailable".to_string()),
    }
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn open_session() -> Result<Session, String> {
    let db_path = resolve_todo_db_path();
    let slot = SqliteSlot::open(&db_path).map_err(|err| {
        error!(
            "event=ffi_session_open module=ffi status=error path={} error={err}",
            db_path.display()
        );
        format!("todo DB open failed: {err}")
    })?;
    Ok(Session {
        store: TodoStore::open(slot),
        removals: RemovalSchedule::default(),
    })
}

fn resolve_todo_db_path() -> PathBuf {
    TODO_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TODO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TODO_DB_FILE_NAME)
        })
        .clone()
}

fn to_items(todos: &[Todo]) -> Vec<TodoItem> {
    todos
        .iter()
        .map(|todo| TodoItem {
            id: todo.id().to_string(),
            text: todo.text().to_string(),
            completed: todo.is_completed(),
            created_at: todo.created_at().to_rfc3339(),
        })
        .collect()
}
