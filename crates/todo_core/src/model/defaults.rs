//! Built-in seed list shown before anything has been persisted.

use super::todo::TodoId;

/// `(id, title, completed)` rows, in authoring order.
///
/// `TodoCollection::builtin_default()` sorts these newest-first.
pub(crate) const DEFAULT_TODOS: &[(TodoId, &str, bool)] = &[
    (1, "Learn React Native", false),
    (2, "Build a to-do app", false),
    (3, "Persist todos on the device", true),
    (4, "Add a task detail screen", false),
    (5, "Publish the app", false),
];
