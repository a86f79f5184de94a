use std::collections::HashSet;
use todo_core::{
    KvTodoRepository, MemoryKeyValueStore, TodoCollection, TodoItem, TodoListStore,
    TodoRepository, TODOS_STORAGE_KEY,
};

fn empty_backend() -> MemoryKeyValueStore {
    MemoryKeyValueStore::with_value(TODOS_STORAGE_KEY, "[]")
}

fn backend_with(items: Vec<TodoItem>) -> MemoryKeyValueStore {
    let collection = TodoCollection::from_items(items).unwrap();
    MemoryKeyValueStore::with_value(
        TODOS_STORAGE_KEY,
        &serde_json::to_string(&collection).unwrap(),
    )
}

fn persisted(backend: &MemoryKeyValueStore) -> TodoCollection {
    KvTodoRepository::new(backend).read().unwrap().unwrap()
}

#[test]
fn add_on_empty_collection_creates_id_one() {
    let backend = empty_backend();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    assert!(store.is_empty());

    let outcome = store.add("Buy milk");
    assert!(outcome.changed);
    assert_eq!(outcome.todo_id, Some(1));
    assert!(outcome.persisted);

    assert_eq!(
        store.items(),
        &[TodoItem {
            id: 1,
            title: "Buy milk".to_string(),
            completed: false,
        }]
    );
}

#[test]
fn add_after_max_id_seven_prepends_id_eight() {
    let backend = backend_with(vec![
        TodoItem::new(3, "three").unwrap(),
        TodoItem::new(7, "seven").unwrap(),
        TodoItem::new(5, "five").unwrap(),
    ]);
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));

    let outcome = store.add("eight");
    assert_eq!(outcome.todo_id, Some(8));
    assert_eq!(store.items()[0].id, 8);
    assert_eq!(store.items()[0].title, "eight");
    assert_eq!(store.len(), 4);
}

#[test]
fn blank_titles_leave_collection_unchanged() {
    let backend = backend_with(vec![TodoItem::new(1, "one").unwrap()]);
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    let before = store.collection().clone();

    for title in ["", "   ", "\t\n"] {
        let outcome = store.add(title);
        assert!(!outcome.changed);
        assert_eq!(outcome.todo_id, None);
    }

    assert_eq!(store.collection(), &before);
    assert_eq!(persisted(&backend), before);
}

#[test]
fn add_stores_trimmed_title() {
    let backend = empty_backend();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    store.add("   Call mom  ");
    assert_eq!(store.items()[0].title, "Call mom");
}

#[test]
fn toggle_twice_restores_completed_flag() {
    let backend = backend_with(vec![TodoItem::new(4, "four").unwrap()]);
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));

    assert!(store.toggle(4).changed);
    assert!(store.get(4).unwrap().completed);
    assert!(persisted(&backend).get(4).unwrap().completed);

    assert!(store.toggle(4).changed);
    assert!(!store.get(4).unwrap().completed);
    assert!(!persisted(&backend).get(4).unwrap().completed);
}

#[test]
fn toggle_unknown_id_is_noop() {
    let backend = backend_with(vec![TodoItem::new(4, "four").unwrap()]);
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    let before = store.collection().clone();

    let outcome = store.toggle(5);
    assert!(!outcome.changed);
    assert_eq!(store.collection(), &before);
}

#[test]
fn second_remove_is_noop() {
    let backend = backend_with(vec![
        TodoItem::new(1, "one").unwrap(),
        TodoItem::new(2, "two").unwrap(),
    ]);
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));

    let first = store.remove(1);
    assert!(first.changed);
    assert_eq!(first.todo_id, Some(1));
    let after_first = store.collection().clone();

    let second = store.remove(1);
    assert!(!second.changed);
    assert_eq!(second.todo_id, None);
    assert_eq!(store.collection(), &after_first);
    assert_eq!(store.len(), 1);
}

#[test]
fn mixed_mutation_sequences_keep_ids_unique() {
    let backend = empty_backend();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));

    for round in 0..20_i64 {
        store.add(&format!("item {round}"));
        if round % 3 == 0 {
            store.remove(round);
        }
        if round % 4 == 0 {
            store.toggle(round / 2);
        }
        if round % 5 == 0 {
            // Removing the current max lets the next add reuse that id.
            let max = store.collection().max_id().unwrap_or(0);
            store.remove(max);
        }

        let ids = store.items().iter().map(|item| item.id).collect::<Vec<_>>();
        let unique = ids.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), ids.len(), "duplicate ids after round {round}");
    }
}

#[test]
fn every_mutation_writes_once_and_last_write_wins() {
    let backend = empty_backend();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));

    store.add("a");
    store.add("b");
    store.toggle(1);
    store.remove(2);
    store.add("   ");
    store.toggle(99);

    assert_eq!(backend.write_count(), 6);
    assert_eq!(&persisted(&backend), store.collection());
}

#[test]
fn failed_write_keeps_in_memory_state_and_reports_divergence() {
    let backend = empty_backend();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    store.add("saved");

    backend.set_fail_writes(true);
    let outcome = store.add("unsaved");
    assert!(outcome.changed);
    assert!(!outcome.persisted);
    assert!(!store.is_in_sync());
    assert_eq!(store.len(), 2);
    assert_eq!(persisted(&backend).len(), 1);

    backend.set_fail_writes(false);
    let outcome = store.toggle(2);
    assert!(outcome.persisted);
    assert!(store.is_in_sync());
    assert_eq!(&persisted(&backend), store.collection());
}

#[test]
fn reload_discards_unsaved_changes() {
    let backend = empty_backend();
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    store.add("saved");

    backend.set_fail_writes(true);
    store.add("lost");
    store.reload();

    assert_eq!(store.len(), 1);
    assert_eq!(store.items()[0].title, "saved");
    assert!(store.is_in_sync());
}

#[test]
fn add_after_largest_representable_id_is_noop() {
    let backend = MemoryKeyValueStore::with_value(
        TODOS_STORAGE_KEY,
        r#"[{"id":9223372036854775807,"title":"big","completed":false}]"#,
    );
    let mut store = TodoListStore::open(KvTodoRepository::new(&backend));
    assert_eq!(store.len(), 1);
    let before = store.collection().clone();

    let outcome = store.add("next");
    assert!(!outcome.changed);
    assert_eq!(outcome.todo_id, None);
    assert!(outcome.persisted);
    assert_eq!(store.collection(), &before);
    assert_eq!(persisted(&backend), before);
}
