//! Repository layer for the persisted to-do collection.
//!
//! # Responsibility
//! - Define the `load`/`save` persistence capability used by the store.
//! - Keep JSON encoding and the fixed storage key inside one boundary.
//!
//! # Invariants
//! - The whole collection is read and written as one value.
//! - `load()` never fails; it degrades to the built-in default.

pub mod todo_repo;
