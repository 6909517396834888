//! Domain model for the todo list.
//!
//! # Responsibility
//! - Define the item record shared by the store, slots and UI layers.
//!
//! # Invariants
//! - Every item is identified by a `TodoId` unique within its list.
//! - Deletion removes the record; there are no tombstones.

pub mod todo;
