//! To-do item model.
//!
//! # Responsibility
//! - Define the persisted item record.
//! - Validate titles before an item enters a collection.
//!
//! # Invariants
//! - `title` is stored trimmed and is never empty.
//! - `completed` starts as `false` for newly created items.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integer identifier of a to-do item.
///
/// Assigned as `max existing id + 1`, starting at `1`.
pub type TodoId = i64;

/// Validation errors for items and collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Two items in one collection share this id.
    DuplicateId(TodoId),
    /// The largest id is `TodoId::MAX`; no further id can be assigned.
    IdExhausted,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "todo title cannot be empty"),
            Self::DuplicateId(id) => write!(f, "duplicate todo id {id} in collection"),
            Self::IdExhausted => write!(f, "no todo id left after {}", TodoId::MAX),
        }
    }
}

impl Error for TodoValidationError {}

/// One to-do entry as shown in the list and persisted under the storage key.
///
/// Serialized shape is `{"id":number,"title":string,"completed":boolean}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl TodoItem {
    /// Creates a pending item with a trimmed title.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` when `title` is blank.
    pub fn new(id: TodoId, title: &str) -> Result<Self, TodoValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }

        Ok(Self {
            id,
            title: trimmed.to_string(),
            completed: false,
        })
    }

    /// Validates an item read from outside the model (e.g. storage).
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Human-readable completion status.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}
