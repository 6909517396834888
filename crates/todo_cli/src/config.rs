//! CLI configuration resolution.
//!
//! # Responsibility
//! - Turn parsed flags and environment into concrete paths and settings.
//! - Fall back to platform data directories when nothing is given.

use clap::ValueEnum;
use std::path::PathBuf;

const DB_FILE_NAME: &str = "todos.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Storage backend used for the durable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database with one row per slot key.
    Sqlite,
    /// One JSON file per slot key.
    Json,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub storage_key: String,
}

impl AppConfig {
    /// Resolves settings; unset directories fall back to the platform data dir.
    pub fn resolve(
        backend: Backend,
        data_dir: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: String,
        storage_key: String,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let log_dir = log_dir.unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));
        Self {
            backend,
            data_dir,
            log_dir,
            log_level,
            storage_key,
        }
    }

    /// SQLite file used by the `sqlite` backend.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Human-readable description of where items live.
    pub fn location(&self) -> String {
        match self.backend {
            Backend::Sqlite => format!("{} (key `{}`)", self.db_path().display(), self.storage_key),
            Backend::Json => self
                .data_dir
                .join(format!("{}.json", self.storage_key))
                .display()
                .to_string(),
        }
    }
}

/// Platform data directory:
/// - Linux: `$XDG_DATA_HOME/todo_list` or `~/.local/share/todo_list`
/// - macOS: `~/Library/Application Support/dev.todo-list.todo_list`
/// - Windows: `%LOCALAPPDATA%\todo-list\todo_list\data`
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "todo-list", "todo_list")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
