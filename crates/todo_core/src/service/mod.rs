//! Core use-case services.
//!
//! # Responsibility
//! - Own todo list state and its persistence orchestration.
//! - Keep UI layers decoupled from slot details.

pub mod removal;
pub mod todo_store;
