//! To-do domain model.
//!
//! # Responsibility
//! - Define the item and collection shapes shared by store and detail paths.
//! - Own id assignment and list mutation rules.
//!
//! # Invariants
//! - Item ids are unique within a collection.
//! - Collections are ordered newest-first; new items are prepended.
//! - Titles are trimmed and never empty.

pub mod collection;
pub mod defaults;
pub mod todo;
