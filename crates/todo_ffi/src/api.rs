//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose list, mutation and detail calls as sync bridge functions.
//! - Translate core results into plain envelopes the UI renders directly.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each mutation runs load, mutate and write under one process-wide lock.

use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use todo_core::db::open_db;
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    KvTodoRepository, MutationOutcome, SqliteKeyValueStore, TodoDetail, TodoDetailView, TodoItem,
    TodoListStore,
};

const TODO_DB_FILE_NAME: &str = "todo_store.sqlite3";
const TODO_DB_PATH_ENV: &str = "TODO_DB_PATH";
static TODO_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

type SqliteTodoStore<'conn> = TodoListStore<KvTodoRepository<SqliteKeyValueStore<'conn>>>;

/// Minimal health-check API for bridge smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<&TodoItem> for TodoItemView {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            completed: item.completed,
        }
    }
}

/// List screen envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    /// Items newest first.
    pub items: Vec<TodoItemView>,
    pub message: String,
}

/// Mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the call reached the store.
    pub ok: bool,
    /// Whether the collection changed.
    pub changed: bool,
    /// Created or affected item id.
    pub todo_id: Option<i64>,
    /// Whether the follow-up write succeeded.
    pub persisted: bool,
    /// Collection after the mutation, newest first.
    pub items: Vec<TodoItemView>,
    pub message: String,
}

impl TodoActionResponse {
    fn from_outcome(
        outcome: MutationOutcome,
        items: Vec<TodoItemView>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ok: true,
            changed: outcome.changed,
            todo_id: outcome.todo_id,
            persisted: outcome.persisted,
            items,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            todo_id: None,
            persisted: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Detail screen envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDetailResponse {
    /// `found`, `missing_id`, `not_found` or `error`.
    pub state: String,
    pub heading: String,
    pub lines: Vec<String>,
    pub item: Option<TodoItemView>,
}

/// Returns the current list, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> TodoListResponse {
    match with_todo_store(|store| items_view(store)) {
        Ok(items) => TodoListResponse {
            ok: true,
            message: format!("{} todo(s).", items.len()),
            items,
        },
        Err(err) => TodoListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("todo_list failed: {err}"),
        },
    }
}

/// Adds a todo; blank titles are accepted as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(title: String) -> TodoActionResponse {
    run_mutation("todo_add", |store| {
        let outcome = store.add(title.as_str());
        let message = if outcome.changed {
            "Todo added."
        } else if title.trim().is_empty() {
            "Title is empty; nothing added."
        } else {
            "No todo id left; nothing added."
        };
        (outcome, message)
    })
}

/// Flips completion of the todo with `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: i64) -> TodoActionResponse {
    run_mutation("todo_toggle", |store| {
        let outcome = store.toggle(id);
        let message = if outcome.changed {
            "Todo updated."
        } else {
            "Todo not found."
        };
        (outcome, message)
    })
}

/// Removes the todo with `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(id: i64) -> TodoActionResponse {
    run_mutation("todo_remove", |store| {
        let outcome = store.remove(id);
        let message = if outcome.changed {
            "Todo removed."
        } else {
            "Todo not found."
        };
        (outcome, message)
    })
}

/// Resolves the detail screen for the `id` route parameter.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_detail(id: Option<String>) -> TodoDetailResponse {
    let db_path = resolve_todo_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=ffi_call module=ffi call=todo_detail status=error error={err}");
            return TodoDetailResponse {
                state: "error".to_string(),
                heading: format!("todo_detail failed: {err}"),
                lines: Vec::new(),
                item: None,
            };
        }
    };

    let view = TodoDetailView::new(KvTodoRepository::new(SqliteKeyValueStore::new(&conn)));
    let detail = view.show(id.as_deref());
    let state = match &detail {
        TodoDetail::MissingId => "missing_id",
        TodoDetail::NotFound { .. } => "not_found",
        TodoDetail::Found(_) => "found",
    };
    TodoDetailResponse {
        state: state.to_string(),
        heading: detail.heading(),
        lines: detail.lines(),
        item: detail.item().map(TodoItemView::from),
    }
}

fn run_mutation(
    call: &str,
    mutate: impl FnOnce(&mut SqliteTodoStore<'_>) -> (MutationOutcome, &'static str),
) -> TodoActionResponse {
    let result = with_todo_store(|store| {
        let (outcome, message) = mutate(store);
        let message = if outcome.persisted {
            message.to_string()
        } else {
            format!("{message} Changes could not be saved.")
        };
        (outcome, items_view(store), message)
    });

    match result {
        Ok((outcome, items, message)) => TodoActionResponse::from_outcome(outcome, items, message),
        Err(err) => TodoActionResponse::failure(format!("{call} failed: {err}")),
    }
}

fn with_todo_store<T>(f: impl FnOnce(&mut SqliteTodoStore<'_>) -> T) -> Result<T, String> {
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_store_db()?;
    let mut store = TodoListStore::open(KvTodoRepository::new(SqliteKeyValueStore::new(&conn)));
    Ok(f(&mut store))
}

fn open_store_db() -> Result<Connection, String> {
    let db_path = resolve_todo_db_path();
    open_db(&db_path).map_err(|err| {
        error!("event=ffi_call module=ffi status=error error_code=db_open_failed error={err}");
        format!("todo DB open failed: {err}")
    })
}

fn items_view(store: &SqliteTodoStore<'_>) -> Vec<TodoItemView> {
    store.items().iter().map(TodoItemView::from).collect()
}

fn resolve_todo_db_path() -> PathBuf {
    TODO_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(TODO_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TODO_DB_FILE_NAME)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, todo_add, todo_detail, todo_list, todo_remove,
        todo_toggle,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn todo_add_prepends_and_appears_in_list() {
        let title = unique_token("ffi-add");
        let added = todo_add(format!("  {title}  "));
        assert!(added.ok, "{}", added.message);
        assert!(added.changed);
        let id = added.todo_id.expect("add should return todo_id");
        assert_eq!(added.items[0].id, id);
        assert_eq!(added.items[0].title, title);

        let listed = todo_list();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().any(|item| item.id == id && item.title == title));
    }

    #[test]
    fn todo_add_blank_title_is_noop() {
        let response = todo_add("   ".to_string());
        assert!(response.ok, "{}", response.message);
        assert!(!response.changed);
        assert_eq!(response.todo_id, None);
    }

    #[test]
    fn todo_toggle_and_detail_report_status() {
        let title = unique_token("ffi-toggle");
        let id = todo_add(title.clone()).todo_id.expect("created id");

        let toggled = todo_toggle(id);
        assert!(toggled.changed);
        assert!(toggled.persisted);

        let detail = todo_detail(Some(id.to_string()));
        assert_eq!(detail.state, "found");
        assert_eq!(detail.heading, format!("Task #{id}"));
        let item = detail.item.expect("detail item");
        assert_eq!(item.title, title);
        assert!(item.completed);
        assert!(detail.lines.contains(&"Status: Completed".to_string()));
    }

    #[test]
    fn todo_remove_drops_item_from_returned_list() {
        let id = todo_add(unique_token("ffi-remove"))
            .todo_id
            .expect("created id");

        let removed = todo_remove(id);
        assert!(removed.ok, "{}", removed.message);
        assert!(removed.changed);
        assert_eq!(removed.todo_id, Some(id));
        assert!(!removed.items.iter().any(|item| item.id == id));
    }

    #[test]
    fn todo_toggle_unknown_id_is_noop() {
        let response = todo_toggle(-1);
        assert!(response.ok, "{}", response.message);
        assert!(!response.changed);
        assert_eq!(response.message, "Todo not found.");
    }

    #[test]
    fn todo_detail_distinguishes_missing_and_malformed_ids() {
        assert_eq!(todo_detail(None).state, "missing_id");
        assert_eq!(todo_detail(Some(String::new())).state, "missing_id");
        let malformed = todo_detail(Some("abc".to_string()));
        assert_eq!(malformed.state, "not_found");
        assert!(malformed.item.is_none());
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
