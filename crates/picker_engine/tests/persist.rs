use std::collections::BTreeMap;
use std::fs;

use picker_engine::{InMemoryStore, JsonFileStore, KeyValueStore, PersistError, PersistedScalar};
use tempfile::TempDir;

#[test]
fn first_write_creates_missing_store_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("store");
    let store = JsonFileStore::open(&dir, "store.json").unwrap();
    assert!(!dir.exists());

    store.set_u64("selected_color_id", 4).unwrap();
    assert!(dir.is_dir());
    assert!(store.path().is_file());
}

#[test]
fn rewrite_replaces_file_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::open(temp.path(), "store.json").unwrap();
    store.set_u64("a", 1).unwrap();
    store.set_u64("a", 2).unwrap();
    store.set_u64("b", 3).unwrap();

    let on_disk: BTreeMap<String, u64> =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        BTreeMap::from([("a".to_string(), 2), ("b".to_string(), 3)])
    );
    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn json_store_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let store = JsonFileStore::open(temp.path(), JsonFileStore::DEFAULT_FILENAME).unwrap();
        assert_eq!(store.get_u64("selected_color_id"), None);
        store.set_u64("selected_color_id", 7).unwrap();
    }

    let reopened = JsonFileStore::open(temp.path(), JsonFileStore::DEFAULT_FILENAME).unwrap();
    assert_eq!(reopened.get_u64("selected_color_id"), Some(7));
    assert!(reopened.path().is_file());
}

#[test]
fn malformed_store_file_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.json"), "not json").unwrap();

    let result = JsonFileStore::open(temp.path(), "broken.json");
    assert!(matches!(result, Err(PersistError::Format(_))));
}

#[test]
fn failed_write_keeps_previous_value() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("store");
    let store = JsonFileStore::open(&dir, "store.json").unwrap();
    // Occupy the directory path with a plain file.
    fs::write(&dir, "x").unwrap();

    assert!(store.set_u64("selected_color_id", 3).is_err());
    assert_eq!(store.get_u64("selected_color_id"), None);
}

#[test]
fn persisted_scalar_falls_back_to_default() {
    let store = InMemoryStore::new();
    let scalar = PersistedScalar::new(&store, "selected_color_id", 1);
    assert_eq!(scalar.get(), 1);

    scalar.set(2).unwrap();
    assert_eq!(scalar.get(), 2);
    assert_eq!(
        PersistedScalar::new(&store, "selected_color_id", 9).get(),
        2
    );
}
