//! Core logic for the to-do app and its map screen.
//! Storage, list mutation and lookup rules live here; UI shells call in.

pub mod db;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use geo::location::{is_same_location, LatLng, LocationError};
pub use geo::route::{PlaceSelection, PlaceSlot, Route, RouteError, RoutePlanner};
pub use geo::watch::{
    LocationSubscription, LocationTracker, LocationWatcher, WatchError, WatchOptions,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::collection::TodoCollection;
pub use model::todo::{TodoId, TodoItem, TodoValidationError};
pub use repo::todo_repo::{
    KvTodoRepository, RepoError, RepoResult, TodoRepository, TODOS_STORAGE_KEY,
};
pub use service::todo_detail::{NotFoundReason, TodoDetail, TodoDetailView};
pub use service::todo_store::{MutationOutcome, TodoListStore};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
