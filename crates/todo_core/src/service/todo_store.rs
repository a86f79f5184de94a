//! To-do list store.
//!
//! # Responsibility
//! - Hold the current collection and apply add/toggle/remove.
//! - Write the full collection through the repository after every mutation.
//!
//! # Invariants
//! - Every mutation call, including no-ops, performs exactly one write
//!   before returning. Writes follow call order, so the last call wins.
//! - A failed write never rolls back the in-memory collection.

use crate::model::collection::TodoCollection;
use crate::model::todo::{TodoId, TodoItem};
use crate::repo::todo_repo::TodoRepository;
use log::{debug, info, warn};

/// Result of one store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Whether the in-memory collection changed.
    pub changed: bool,
    /// Id of the affected item, when one matched or was created.
    pub todo_id: Option<TodoId>,
    /// Whether the follow-up write succeeded.
    pub persisted: bool,
}

/// In-memory to-do list mirrored to a repository.
pub struct TodoListStore<R: TodoRepository> {
    repo: R,
    todos: TodoCollection,
    in_sync: bool,
}

impl<R: TodoRepository> TodoListStore<R> {
    /// Creates a store and loads its initial state from `repo`.
    ///
    /// Uses the degrade-to-default `load()` contract, so this never fails.
    pub fn open(repo: R) -> Self {
        let todos = repo.load();
        Self {
            repo,
            todos,
            in_sync: true,
        }
    }

    /// Replaces the in-memory state with a fresh `load()`.
    pub fn reload(&mut self) {
        self.todos = self.repo.load();
        self.in_sync = true;
    }

    pub fn collection(&self) -> &TodoCollection {
        &self.todos
    }

    /// Current items, newest first.
    pub fn items(&self) -> &[TodoItem] {
        self.todos.items()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.get(id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Whether the last write reached the repository.
    pub fn is_in_sync(&self) -> bool {
        self.in_sync
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Prepends a new pending item titled `title` (trimmed).
    ///
    /// Blank titles leave the collection unchanged.
    pub fn add(&mut self, title: &str) -> MutationOutcome {
        let todo_id = match self.todos.add(title) {
            Ok(id) => {
                info!("event=todo_add module=service status=ok todo_id={id}");
                Some(id)
            }
            Err(err) => {
                debug!("event=todo_add module=service status=noop reason={err}");
                None
            }
        };
        self.finish(todo_id.is_some(), todo_id)
    }

    /// Flips `completed` on the item with `id`; unknown ids are a no-op.
    pub fn toggle(&mut self, id: TodoId) -> MutationOutcome {
        let changed = match self.todos.toggle(id) {
            Some(completed) => {
                info!("event=todo_toggle module=service status=ok todo_id={id} completed={completed}");
                true
            }
            None => {
                debug!("event=todo_toggle module=service status=noop todo_id={id}");
                false
            }
        };
        self.finish(changed, changed.then_some(id))
    }

    /// Removes the item with `id`; unknown ids are a no-op.
    pub fn remove(&mut self, id: TodoId) -> MutationOutcome {
        let changed = match self.todos.remove(id) {
            Some(_) => {
                info!("event=todo_remove module=service status=ok todo_id={id}");
                true
            }
            None => {
                debug!("event=todo_remove module=service status=noop todo_id={id}");
                false
            }
        };
        self.finish(changed, changed.then_some(id))
    }

    /// Writes the current collection to the repository.
    ///
    /// Returns whether the write succeeded. Failures are logged by the
    /// repository and only recorded here.
    pub fn persist(&mut self) -> bool {
        self.in_sync = match self.repo.save(&self.todos) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=todos_persist module=service status=error count={} error={}",
                    self.todos.len(),
                    err
                );
                false
            }
        };
        self.in_sync
    }

    fn finish(&mut self, changed: bool, todo_id: Option<TodoId>) -> MutationOutcome {
        let persisted = self.persist();
        MutationOutcome {
            changed,
            todo_id,
            persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TodoListStore;
    use crate::repo::todo_repo::KvTodoRepository;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn open_on_empty_storage_uses_builtin_default() {
        let backend = MemoryKeyValueStore::new();
        let store = TodoListStore::open(KvTodoRepository::new(&backend));
        assert!(!store.is_empty());
        assert!(store.is_in_sync());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn noop_mutation_still_writes_once() {
        let backend = MemoryKeyValueStore::with_value("@todos", "[]");
        let mut store = TodoListStore::open(KvTodoRepository::new(&backend));

        let outcome = store.toggle(99);
        assert!(!outcome.changed);
        assert_eq!(outcome.todo_id, None);
        assert!(outcome.persisted);
        assert_eq!(backend.write_count(), 1);
    }
}
