//! Terminal front end for the todo list.
//!
//! # Responsibility
//! - Map subcommands onto `TodoStore` operations.
//! - Re-render the whole list after every mutation, with an empty indicator.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{AppConfig, Backend};
use log::warn;
use std::io::Write;
use std::path::PathBuf;
use todo_core::{
    default_log_level, init_logging, FileSlot, SqliteSlot, StoreError, Todo, TodoId, TodoSlot,
    TodoStore, STORAGE_KEY,
};

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Keep a small local todo list")]
struct Cli {
    /// Storage backend for the item list.
    #[arg(long, value_enum, env = "TODO_BACKEND", default_value = "sqlite")]
    backend: Backend,
    /// Directory holding the todo database or JSON file.
    #[arg(long, env = "TODO_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, env = "TODO_LOG_DIR")]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "TODO_LOG_LEVEL", default_value = default_log_level())]
    log_level: String,
    /// Slot key the list is stored under.
    #[arg(long, env = "TODO_STORAGE_KEY", default_value = STORAGE_KEY)]
    key: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Show all items, newest first (default).
    List,
    /// Add an item; words are joined with spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip an item between open and done.
    Toggle { id: String },
    /// Remove an item.
    Delete { id: String },
    /// Print where items are stored.
    Where,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.backend, cli.data_dir, cli.log_dir, cli.log_level, cli.key);
    let command = cli.command.unwrap_or(Command::List);

    if let Some(log_dir) = config.log_dir.to_str() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    if command == Command::Where {
        println!("{}", config.location());
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.backend {
        Backend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("failed to create data dir `{}`", config.data_dir.display())
            })?;
            let slot = SqliteSlot::open(config.db_path())
                .with_context(|| format!("failed to open `{}`", config.db_path().display()))?;
            let mut store = TodoStore::open_with_key(slot, config.storage_key.as_str());
            run(&mut store, command, &mut out)
        }
        Backend::Json => {
            let slot = FileSlot::new(config.data_dir.clone());
            let mut store = TodoStore::open_with_key(slot, config.storage_key.as_str());
            run(&mut store, command, &mut out)
        }
    }
}

fn run<S: TodoSlot>(store: &mut TodoStore<S>, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List | Command::Where => {}
        Command::Add { text } => match store.add(&text.join(" ")) {
            Ok(todo) => writeln!(out, "added {}", todo.id())?,
            Err(StoreError::BlankText) => {
                writeln!(out, "nothing to add: text is blank")?;
                return Ok(());
            }
            Err(err) => return Err(err).context("add failed"),
        },
        Command::Toggle { id } => {
            let id = TodoId::from(id);
            if !store.toggle(&id).context("toggle failed")? {
                warn!("event=cli_toggle module=cli status=not_found id={id}");
                writeln!(out, "no item with id {id}")?;
            }
        }
        Command::Delete { id } => {
            let id = TodoId::from(id);
            if !store.delete(&id).context("delete failed")? {
                warn!("event=cli_delete module=cli status=not_found id={id}");
                writeln!(out, "no item with id {id}")?;
            }
        }
    }

    render(store.todos(), out)
}

fn render(todos: &[Todo], out: &mut impl Write) -> Result<()> {
    if todos.is_empty() {
        writeln!(out, "No todos yet.")?;
        return Ok(());
    }

    for todo in todos {
        let mark = if todo.is_completed() { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  {}", todo.id(), todo.text())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use todo_core::{MemorySlot, TodoStore};

    fn run_to_string(store: &mut TodoStore<&MemorySlot>, command: Command) -> String {
        let mut out = Vec::new();
        run(store, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_list_shows_indicator() {
        let slot = MemorySlot::new();
        let mut store = TodoStore::open(&slot);
        assert_eq!(run_to_string(&mut store, Command::List), "No todos yet.\n");
    }

    #[test]
    fn add_joins_words_and_renders_newest_first() {
        let slot = MemorySlot::new();
        let mut store = TodoStore::open(&slot);
        run_to_string(
            &mut store,
            Command::Add {
                text: vec!["buy".into(), "milk".into()],
            },
        );
        let output = run_to_string(
            &mut store,
            Command::Add {
                text: vec!["call mom".into()],
            },
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("call mom"));
        assert!(lines[2].ends_with("buy milk"));
    }

    #[test]
    fn blank_add_reports_and_keeps_list() {
        let slot = MemorySlot::new();
        let mut store = TodoStore::open(&slot);
        let output = run_to_string(
            &mut store,
            Command::Add {
                text: vec!["  ".into()],
            },
        );
        assert_eq!(output, "nothing to add: text is blank\n");
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_marks_item_done_and_unknown_id_is_reported() {
        let slot = MemorySlot::new();
        let mut store = TodoStore::open(&slot);
        let todo = store.add("stretch").unwrap();

        let output = run_to_string(
            &mut store,
            Command::Toggle {
                id: todo.id().to_string(),
            },
        );
        assert_eq!(output, format!("[x] {}  stretch\n", todo.id()));

        let output = run_to_string(&mut store, Command::Delete { id: "nope".into() });
        assert!(output.starts_with("no item with id nope\n"));
        assert_eq!(store.len(), 1);
    }
}
