//! To-do collection repository over a key-value store.
//!
//! # Responsibility
//! - Encode/decode the collection as a JSON array under `@todos`.
//! - Implement the degrade-to-default read contract.
//!
//! # Invariants
//! - Persisted values that fail to parse or validate are never returned.
//! - Writes overwrite the previous value wholesale.

use crate::model::collection::TodoCollection;
use crate::model::todo::TodoValidationError;
use crate::storage::{KeyValueStore, StorageError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the whole collection is stored.
pub const TODOS_STORAGE_KEY: &str = "@todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection persistence.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    InvalidData(TodoValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode todos: {err}"),
            Self::Decode(err) => write!(f, "failed to decode persisted todos: {err}"),
            Self::InvalidData(err) => write!(f, "invalid persisted todos: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::InvalidData(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::InvalidData(value)
    }
}

/// Persistence capability for the to-do collection.
pub trait TodoRepository {
    /// Reads the persisted collection, `Ok(None)` when nothing is stored.
    fn read(&self) -> RepoResult<Option<TodoCollection>>;

    /// Writes the full collection, replacing any prior value.
    fn save(&self, collection: &TodoCollection) -> RepoResult<()>;

    /// Reads the collection, falling back to the built-in default.
    ///
    /// Absent values, storage failures and malformed data all yield the
    /// default sorted newest-first. Failures are logged, never returned.
    fn load(&self) -> TodoCollection {
        match self.read() {
            Ok(Some(collection)) => {
                info!(
                    "event=todos_load module=repo status=ok source=persisted count={}",
                    collection.len()
                );
                collection
            }
            Ok(None) => {
                info!("event=todos_load module=repo status=ok source=default");
                TodoCollection::builtin_default()
            }
            Err(err) => {
                let error_code = match err {
                    RepoError::Storage(_) => "storage_read_failed",
                    _ => "decode_failed",
                };
                warn!(
                    "event=todos_load module=repo status=degraded source=default error_code={} error={}",
                    error_code, err
                );
                TodoCollection::builtin_default()
            }
        }
    }
}

/// Key-value backed repository storing the collection under `@todos`.
pub struct KvTodoRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvTodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> TodoRepository for KvTodoRepository<S> {
    fn read(&self) -> RepoResult<Option<TodoCollection>> {
        let Some(raw) = self.store.get(TODOS_STORAGE_KEY)? else {
            return Ok(None);
        };
        decode_collection(&raw).map(Some)
    }

    fn save(&self, collection: &TodoCollection) -> RepoResult<()> {
        let encoded = serde_json::to_string(collection).map_err(RepoError::Encode)?;
        match self.store.set(TODOS_STORAGE_KEY, &encoded) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(
                    "event=todos_save module=repo status=error error_code=storage_write_failed count={} error={}",
                    collection.len(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Parses and validates one persisted collection value.
pub fn decode_collection(raw: &str) -> RepoResult<TodoCollection> {
    let collection: TodoCollection = serde_json::from_str(raw).map_err(RepoError::Decode)?;
    collection.validate()?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, RepoError};

    #[test]
    fn decode_rejects_non_array_json() {
        assert!(matches!(
            decode_collection(r#"{"id":1}"#),
            Err(RepoError::Decode(_))
        ));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let raw = r#"[{"id":1,"title":"a","completed":false},{"id":1,"title":"b","completed":true}]"#;
        assert!(matches!(
            decode_collection(raw),
            Err(RepoError::InvalidData(_))
        ));
    }

    #[test]
    fn decode_keeps_persisted_order() {
        let raw = r#"[{"id":2,"title":"b","completed":true},{"id":9,"title":"a","completed":false}]"#;
        let collection = decode_collection(raw).unwrap();
        let ids = collection
            .items()
            .iter()
            .map(|item| item.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 9]);
    }
}
