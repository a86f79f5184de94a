//! Ordered to-do collection, the unit of persistence.
//!
//! # Responsibility
//! - Hold items newest-first and assign ids for new items.
//! - Apply add/toggle/remove mutations in place.
//!
//! # Invariants
//! - No two items share an id.
//! - `next_id()` is `max id + 1`, or `1` for an empty collection; it never wraps.

use super::defaults::DEFAULT_TODOS;
use super::todo::{TodoId, TodoItem, TodoValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of to-do items, newest first.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoCollection {
    items: Vec<TodoItem>,
}

impl TodoCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from existing items, keeping their order.
    ///
    /// # Errors
    /// - `EmptyTitle` when any item has a blank title.
    /// - `DuplicateId` when two items share an id.
    pub fn from_items(items: Vec<TodoItem>) -> Result<Self, TodoValidationError> {
        let collection = Self { items };
        collection.validate()?;
        Ok(collection)
    }

    /// Returns the built-in seed list sorted by descending id.
    pub fn builtin_default() -> Self {
        let mut items = DEFAULT_TODOS
            .iter()
            .map(|(id, title, completed)| TodoItem {
                id: *id,
                title: (*title).to_string(),
                completed: *completed,
            })
            .collect::<Vec<_>>();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Self { items }
    }

    /// Checks title and id-uniqueness invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.validate()?;
            if !seen.insert(item.id) {
                return Err(TodoValidationError::DuplicateId(item.id));
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<TodoItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn max_id(&self) -> Option<TodoId> {
        self.items.iter().map(|item| item.id).max()
    }

    /// Id the next added item receives.
    ///
    /// # Errors
    /// - `IdExhausted` when the current max id is `TodoId::MAX`.
    pub fn next_id(&self) -> Result<TodoId, TodoValidationError> {
        match self.max_id() {
            Some(max) => max
                .checked_add(1)
                .ok_or(TodoValidationError::IdExhausted),
            None => Ok(1),
        }
    }

    /// Prepends a new pending item and returns its assigned id.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank; the collection is unchanged.
    /// - `IdExhausted` when no id is left; the collection is unchanged.
    pub fn add(&mut self, title: &str) -> Result<TodoId, TodoValidationError> {
        let item = TodoItem::new(self.next_id()?, title)?;
        let id = item.id;
        self.items.insert(0, item);
        Ok(id)
    }

    /// Flips `completed` on the matching item.
    ///
    /// Returns the new flag, or `None` when no item matches.
    pub fn toggle(&mut self, id: TodoId) -> Option<bool> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .map(TodoItem::toggle)
    }

    /// Removes the matching item and returns it.
    pub fn remove(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
