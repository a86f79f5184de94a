//! To-do use-case services.
//!
//! # Responsibility
//! - Own the in-memory list state and drive persistence after each mutation.
//! - Serve the read-only detail lookup.
//!
//! # Invariants
//! - Services depend on `TodoRepository`, never on a concrete backend.

pub mod todo_detail;
pub mod todo_store;
