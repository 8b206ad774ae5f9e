//! Tests for category preference persistence

use super::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn cats(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn test_store_roundtrip() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("prefs.json"));

    assert!(store.load_categories().unwrap().is_empty());
    store.save_categories(&cats(&["music", "sports"])).unwrap();
    assert_eq!(store.load_categories().unwrap(), cats(&["music", "sports"]));
}

#[test]
fn test_store_save_preference_flag() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("prefs.json"));

    assert!(!store.save_preference_enabled());
    store.set_save_preference(true).unwrap();
    assert!(store.save_preference_enabled());

    // flag survives alongside categories
    store.save_categories(&cats(&["music"])).unwrap();
    assert!(store.save_preference_enabled());
}

#[test]
fn test_store_rejects_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(path);
    assert!(store.load_categories().is_err());
}

#[test]
fn test_store_creates_missing_parent_dirs() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/deeper/prefs.json"));
    store.save_categories(&cats(&["arts"])).unwrap();
    assert_eq!(store.load_categories().unwrap(), cats(&["arts"]));
}

#[test]
fn test_selection_save_honors_preference_flag() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("prefs.json")));

    let mut selection = CategorySelection::new(store.clone()).unwrap();
    selection.set_items(cats(&["music"]));

    // disabled: save is a no-op
    selection.save().unwrap();
    assert!(store.load_categories().unwrap().is_empty());

    // enabled: save persists
    selection.set_save_preference(true).unwrap();
    selection.save().unwrap();
    assert_eq!(store.load_categories().unwrap(), cats(&["music"]));
}

#[test]
fn test_selection_reload_items() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("prefs.json")));
    store.set_save_preference(true).unwrap();
    store.save_categories(&cats(&["music"])).unwrap();

    let mut selection = CategorySelection::new(store.clone()).unwrap();
    assert_eq!(selection.items(), cats(&["music"]));

    store.save_categories(&cats(&["sports"])).unwrap();
    selection.reload_items().unwrap();
    assert_eq!(selection.items(), cats(&["sports"]));
}
