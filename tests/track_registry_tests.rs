// Integration tests for the persisted track registry
//
// These verify insertion-ordered listing, remove/update semantics, the
// reload round-trip, and the silent-degradation persistence policy.

use anyhow::Result;
use echo_client::storage::{FileStore, KvStore, MemoryStore, TRACKS_KEY};
use echo_client::track::{Fluency, Level, Track, TrackPatch, TrackRegistry};
use std::sync::Arc;
use tempfile::TempDir;

fn track(id: &str, language: &str, level: Level) -> Track {
    Track {
        id: id.to_string(),
        name: format!("{language} Track"),
        language: language.to_string(),
        native_language: "English".to_string(),
        level,
        accent: String::new(),
        current_fluency: None,
        desired_fluency: None,
        system_prompt: None,
        initial_topics: Vec::new(),
    }
}

#[test]
fn test_list_survives_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store: Arc<dyn KvStore> = Arc::new(FileStore::new(temp_dir.path())?);

    let mut registry = TrackRegistry::open(Arc::clone(&store));
    registry.add(track("t1", "Spanish", Level::Beginner));
    registry.add(track("t2", "French", Level::Intermediate));
    registry.remove("missing");
    registry.update(
        "t2",
        TrackPatch {
            accent: Some("Parisian".to_string()),
            ..Default::default()
        },
    );

    let before: Vec<String> = registry.list().iter().map(|t| t.id.clone()).collect();

    // Reload from the same store, simulating a page reload
    let reloaded = TrackRegistry::open(store);
    let after: Vec<String> = reloaded.list().iter().map(|t| t.id.clone()).collect();

    assert_eq!(before, after);
    assert_eq!(reloaded.list().len(), 2);
    assert_eq!(reloaded.get("t2").unwrap().accent, "Parisian");
    Ok(())
}

#[test]
fn test_remove_deletes_only_matching_id() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = TrackRegistry::open(store);

    registry.add(track("t1", "Spanish", Level::Beginner));
    registry.add(track("t2", "French", Level::Beginner));

    registry.remove("t1");
    assert!(registry.list().iter().all(|t| t.id != "t1"));
    assert_eq!(registry.list().len(), 1);

    // Removing a nonexistent id leaves the list unchanged
    registry.remove("t1");
    registry.remove("never-existed");
    assert_eq!(registry.list().len(), 1);
    assert_eq!(registry.list()[0].id, "t2");
}

#[test]
fn test_update_touches_only_patched_fields() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = TrackRegistry::open(store);

    registry.add(track("t1", "Spanish", Level::Beginner));
    registry.add(track("t2", "French", Level::Beginner));

    registry.update(
        "t1",
        TrackPatch {
            level: Some(Level::Advanced),
            ..Default::default()
        },
    );

    let t1 = registry.get("t1").unwrap();
    assert_eq!(t1.level, Level::Advanced);
    assert_eq!(t1.language, "Spanish");
    assert_eq!(t1.native_language, "English");
    assert_eq!(t1.current_fluency, None);

    // Other entries untouched
    let t2 = registry.get("t2").unwrap();
    assert_eq!(t2.level, Level::Beginner);
}

#[test]
fn test_update_nonexistent_is_noop() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = TrackRegistry::open(store);

    registry.add(track("t1", "Spanish", Level::Beginner));
    let updated = registry.update(
        "ghost",
        TrackPatch {
            current_fluency: Some(Fluency::B2),
            ..Default::default()
        },
    );

    assert!(updated.is_none());
    assert_eq!(registry.list().len(), 1);
    assert_eq!(registry.get("t1").unwrap().current_fluency, None);
}

#[test]
fn test_corrupt_persisted_data_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store.preload(TRACKS_KEY, "{not json at all");

    let registry = TrackRegistry::open(store);
    assert!(registry.list().is_empty());
}

#[test]
fn test_write_failure_keeps_memory_state() {
    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    let mut registry = TrackRegistry::open(Arc::new(ReadOnlyStore));
    registry.add(track("t1", "Spanish", Level::Beginner));

    // The failed write is swallowed; the in-memory list stays authoritative
    assert_eq!(registry.list().len(), 1);
    assert_eq!(registry.list()[0].id, "t1");
}

#[test]
fn test_patch_level_scenario() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = TrackRegistry::open(store);

    registry.add(track("t1", "Spanish", Level::Beginner));
    registry.update(
        "t1",
        TrackPatch {
            level: Some(Level::Advanced),
            ..Default::default()
        },
    );

    let listed = registry.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].level, Level::Advanced);
    assert_eq!(listed[0].language, "Spanish");
}
