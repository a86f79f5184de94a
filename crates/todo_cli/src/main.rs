//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage without the mobile shell.
//! - Exercise the in-memory store path once and print deterministic output.

use todo_core::{KvTodoRepository, MemoryKeyValueStore, TodoListStore, TODOS_STORAGE_KEY};

fn main() {
    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    let backend = MemoryKeyValueStore::new();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    let seeded = store.len();
    let outcome = store.add("smoke check");
    println!(
        "todo_core store key={} seeded={} added_id={} persisted={}",
        TODOS_STORAGE_KEY,
        seeded,
        outcome.todo_id.unwrap_or_default(),
        outcome.persisted
    );
}
