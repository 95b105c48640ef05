// Integration tests for the persisted message log
//
// Append order is the canonical display order; reads are pure filters;
// clears are the only deletions.

use anyhow::Result;
use echo_client::chat::{MessageLog, NewMessage, Sender};
use echo_client::storage::{FileStore, KvStore, MemoryStore, MESSAGES_KEY};
use std::sync::Arc;
use tempfile::TempDir;

fn msg(id: &str, track_id: &str, text: &str) -> NewMessage {
    NewMessage {
        id: Some(id.to_string()),
        sender: Sender::User,
        text: text.to_string(),
        timestamp: None,
        track_id: Some(track_id.to_string()),
    }
}

#[test]
fn test_append_preserves_order() {
    let mut log = MessageLog::open(Arc::new(MemoryStore::new()));

    for i in 0..5 {
        log.append(msg(&format!("m{i}"), "t1", &format!("line {i}")));
    }

    let ids: Vec<&str> = log.iter_for(None).map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m0", "m1", "m2", "m3", "m4"]);
}

#[test]
fn test_iter_for_filters_by_track() {
    let mut log = MessageLog::open(Arc::new(MemoryStore::new()));

    log.append(msg("m1", "t1", "hola"));
    log.append(msg("m2", "t2", "hi"));
    log.append(msg("m3", "t1", "que tal"));
    log.append(NewMessage::assistant("untagged", None));

    let t1: Vec<&str> = log.iter_for(Some("t1")).map(|m| m.id.as_str()).collect();
    assert_eq!(t1, vec!["m1", "m3"]);

    // Matching subsequence, same relative order as the full listing
    let all: Vec<&str> = log.iter_for(None).map(|m| m.id.as_str()).collect();
    let filtered: Vec<&str> = all
        .iter()
        .copied()
        .filter(|id| t1.contains(id))
        .collect();
    assert_eq!(filtered, t1);

    // The iterator is restartable
    assert_eq!(log.iter_for(Some("t1")).count(), 2);
    assert_eq!(log.iter_for(Some("t1")).count(), 2);
}

#[test]
fn test_single_track_scenario() {
    let mut log = MessageLog::open(Arc::new(MemoryStore::new()));

    log.append(msg("m1", "t1", "hola"));
    log.append(msg("m2", "t2", "hi"));

    let t1: Vec<&str> = log.iter_for(Some("t1")).map(|m| m.id.as_str()).collect();
    assert_eq!(t1, vec!["m1"]);
}

#[test]
fn test_clear_for_track_is_exact_and_idempotent() {
    let mut log = MessageLog::open(Arc::new(MemoryStore::new()));

    log.append(msg("m1", "t1", "a"));
    log.append(msg("m2", "t2", "b"));
    log.append(msg("m3", "t1", "c"));
    log.append(msg("m4", "t3", "d"));

    log.clear_for_track("t1");
    assert_eq!(log.iter_for(Some("t1")).count(), 0);

    let rest: Vec<&str> = log.iter_for(None).map(|m| m.id.as_str()).collect();
    assert_eq!(rest, vec!["m2", "m4"]);

    // Second clear has no further effect
    log.clear_for_track("t1");
    let rest: Vec<&str> = log.iter_for(None).map(|m| m.id.as_str()).collect();
    assert_eq!(rest, vec!["m2", "m4"]);
}

#[test]
fn test_clear_empties_everything() {
    let mut log = MessageLog::open(Arc::new(MemoryStore::new()));

    log.append(msg("m1", "t1", "a"));
    log.append(NewMessage::user("global", None));
    log.clear();

    assert!(log.is_empty());
    assert_eq!(log.iter_for(None).count(), 0);
}

#[test]
fn test_append_fills_defaults_without_collisions() {
    let mut log = MessageLog::open(Arc::new(MemoryStore::new()));

    // Rapid appends: ids must still be unique
    let mut ids = Vec::new();
    for _ in 0..100 {
        let stored = log.append(NewMessage::user("hello", Some("t1".to_string())));
        assert!(!stored.id.is_empty());
        ids.push(stored.id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_log_survives_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store: Arc<dyn KvStore> = Arc::new(FileStore::new(temp_dir.path())?);

    let mut log = MessageLog::open(Arc::clone(&store));
    log.append(msg("m1", "t1", "hola"));
    log.append(msg("m2", "t2", "hi"));

    let reloaded = MessageLog::open(store);
    let ids: Vec<&str> = reloaded.iter_for(None).map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
    assert_eq!(reloaded.len(), 2);
    Ok(())
}

#[test]
fn test_corrupt_persisted_data_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store.preload(MESSAGES_KEY, "[{\"id\": 42}]");

    let log = MessageLog::open(store);
    assert!(log.is_empty());
}

#[test]
fn test_legacy_sender_labels_map_to_assistant() {
    let store = Arc::new(MemoryStore::new());
    store.preload(
        MESSAGES_KEY,
        r#"[
            {"id":"m1","sender":"ai","text":"hola","timestamp":"2025-11-02T10:00:00Z","trackId":"t1"},
            {"id":"m2","sender":"bot","text":"salut","timestamp":"2025-11-02T10:00:01Z"},
            {"id":"m3","sender":"echo","text":"ciao","timestamp":"2025-11-02T10:00:02Z"},
            {"id":"m4","sender":"human","text":"hi","timestamp":"2025-11-02T10:00:03Z"}
        ]"#,
    );

    let log = MessageLog::open(store);
    let senders: Vec<Sender> = log.iter_for(None).map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![
            Sender::Assistant,
            Sender::Assistant,
            Sender::Assistant,
            Sender::User
        ]
    );
}
