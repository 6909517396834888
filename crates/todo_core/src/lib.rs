//! Core state and persistence for the todo list.
//! UI layers (CLI, FFI) call into this crate and re-render from the store.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod slot;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{Todo, TodoId};
pub use service::removal::{flush_due, RemovalSchedule, REMOVAL_DELAY};
pub use service::todo_store::{StoreError, StoreResult, TodoStore, STORAGE_KEY};
pub use slot::{FileSlot, MemorySlot, SlotError, SlotResult, SqliteSlot, TodoSlot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
