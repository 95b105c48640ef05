use std::sync::Arc;
use tracing::warn;

use super::message::{Message, NewMessage};
use crate::storage::{KvStore, MESSAGES_KEY};

/// Persisted, ordered append-log of chat and transcript entries.
///
/// Insertion order is the canonical display order. Entries are never deleted
/// individually, only bulk-cleared. Persistence follows the same
/// log-and-swallow policy as the track registry.
pub struct MessageLog {
    store: Arc<dyn KvStore>,
    messages: Vec<Message>,
}

impl MessageLog {
    /// Load the log from the store; malformed persisted data starts empty.
    pub fn open(store: Arc<dyn KvStore>) -> Self {
        let messages = match store.get(MESSAGES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(messages) => messages,
                Err(e) => {
                    warn!("Discarding unparseable message log data: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read message log, starting empty: {}", e);
                Vec::new()
            }
        };

        Self { store, messages }
    }

    /// Append one entry, filling in a fresh id and timestamp where missing.
    /// Returns the stored message.
    pub fn append(&mut self, new: NewMessage) -> Message {
        let message = new.into_message();
        self.messages.push(message.clone());
        self.persist();
        message
    }

    /// Empty the whole log.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.persist();
    }

    /// Remove exactly the messages belonging to `track_id`, keeping the
    /// relative order of the rest. Idempotent.
    pub fn clear_for_track(&mut self, track_id: &str) {
        self.messages
            .retain(|m| m.track_id.as_deref() != Some(track_id));
        self.persist();
    }

    /// Lazy, restartable read-side filter. `None` yields every message in
    /// append order; `Some(t)` yields the matching subsequence.
    pub fn iter_for<'a>(
        &'a self,
        track_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| match track_id {
            None => true,
            Some(t) => m.track_id.as_deref() == Some(t),
        })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.messages) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize message log: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(MESSAGES_KEY, &raw) {
            warn!("Failed to persist message log: {}", e);
        }
    }
}
