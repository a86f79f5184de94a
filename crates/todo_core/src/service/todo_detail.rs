//! Read-only to-do detail lookup.
//!
//! # Responsibility
//! - Resolve a string route parameter to one item of the persisted collection.
//! - Describe the result as one of three displayable states.
//!
//! # Invariants
//! - Lookups never write to the repository.
//! - A missing parameter short-circuits before any load.

use crate::model::collection::TodoCollection;
use crate::model::todo::{TodoId, TodoItem};
use crate::repo::todo_repo::TodoRepository;
use log::debug;

/// Why a present route parameter did not resolve to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The parameter is not an integral number.
    Malformed,
    /// The parameter parsed but no item carries that id.
    NoMatch,
}

/// Displayable detail state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoDetail {
    /// No id was supplied with the request.
    MissingId,
    /// The id did not resolve; rendered the same for both reasons.
    NotFound {
        requested: String,
        reason: NotFoundReason,
    },
    Found(TodoItem),
}

impl TodoDetail {
    /// Screen header text.
    pub fn heading(&self) -> String {
        match self {
            Self::MissingId => "Task id not provided".to_string(),
            Self::NotFound { .. } => "Task not found".to_string(),
            Self::Found(item) => format!("Task #{}", item.id),
        }
    }

    /// Body lines shown under the heading.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::MissingId | Self::NotFound { .. } => Vec::new(),
            Self::Found(item) => vec![
                "Task details".to_string(),
                format!("ID: {}", item.id),
                format!("Title: {}", item.title),
                format!("Status: {}", item.status_label()),
            ],
        }
    }

    pub fn item(&self) -> Option<&TodoItem> {
        match self {
            Self::Found(item) => Some(item),
            _ => None,
        }
    }
}

/// Detail read path over a repository.
pub struct TodoDetailView<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoDetailView<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the collection and looks up the item named by `id_param`.
    pub fn show(&self, id_param: Option<&str>) -> TodoDetail {
        match id_param {
            None | Some("") => TodoDetail::MissingId,
            Some(raw) => lookup(&self.repo.load(), raw),
        }
    }
}

/// Looks up `raw` in an already loaded collection.
///
/// An empty `raw` is treated as a missing parameter.
pub fn lookup(collection: &TodoCollection, raw: &str) -> TodoDetail {
    if raw.is_empty() {
        return TodoDetail::MissingId;
    }

    let Some(id) = parse_route_id(raw) else {
        debug!("event=todo_detail module=service status=not_found reason=malformed");
        return TodoDetail::NotFound {
            requested: raw.to_string(),
            reason: NotFoundReason::Malformed,
        };
    };

    match collection.get(id) {
        Some(item) => TodoDetail::Found(item.clone()),
        None => {
            debug!("event=todo_detail module=service status=not_found reason=no_match todo_id={id}");
            TodoDetail::NotFound {
                requested: raw.to_string(),
                reason: NotFoundReason::NoMatch,
            }
        }
    }
}

/// Coerces a route parameter to an item id.
///
/// Accepts integers, integral float notation (`"7"`, `" +7 "`, `"7.0"`,
/// `"7e0"`) and unsigned hex/octal/binary literals (`"0x7"`, `"0o7"`,
/// `"0b111"`). Returns `None` for anything else.
pub fn parse_route_id(raw: &str) -> Option<TodoId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<TodoId>() {
        return Some(id);
    }
    if let Some(id) = parse_prefixed_literal(trimmed) {
        return id;
    }

    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < TodoId::MIN as f64 || value >= TodoId::MAX as f64 {
        return None;
    }
    Some(value as TodoId)
}

/// `Some(result)` when `value` carries a radix prefix, `None` otherwise.
///
/// Signs are not allowed after a prefix (`"-0x7"` is malformed).
fn parse_prefixed_literal(value: &str) -> Option<Option<TodoId>> {
    let prefix = value.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &value[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }
    Some(TodoId::from_str_radix(digits, radix).ok())
}
