use std::sync::Arc;
use tracing::warn;

use super::model::{Track, TrackPatch};
use crate::storage::{KvStore, TRACKS_KEY};

/// Persisted, insertion-ordered collection of learning tracks.
///
/// Constructed once with an injected store and passed by handle to consumers.
/// Every mutation rewrites the full list synchronously; a failed write is
/// logged and swallowed, leaving the in-memory state authoritative for the
/// rest of the session.
pub struct TrackRegistry {
    store: Arc<dyn KvStore>,
    tracks: Vec<Track>,
}

impl TrackRegistry {
    /// Load the registry from the store. Missing or unparseable persisted
    /// data is discarded and treated as an empty registry, never an error.
    pub fn open(store: Arc<dyn KvStore>) -> Self {
        let tracks = match store.get(TRACKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(tracks) => tracks,
                Err(e) => {
                    warn!("Discarding unparseable track registry data: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read track registry, starting empty: {}", e);
                Vec::new()
            }
        };

        Self { store, tracks }
    }

    /// All tracks in insertion order.
    pub fn list(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Append a track. The caller supplies the id and has already validated
    /// the form; the registry performs no validation of its own.
    pub fn add(&mut self, track: Track) {
        self.tracks.push(track);
        self.persist();
    }

    /// Remove the track with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.tracks.retain(|t| t.id != id);
        self.persist();
    }

    /// Shallow-merge `patch` onto the matching track. Unknown ids are a
    /// no-op. Returns the updated track, if any.
    pub fn update(&mut self, id: &str, patch: TrackPatch) -> Option<&Track> {
        let track = self.tracks.iter_mut().find(|t| t.id == id)?;
        patch.apply(track);
        self.persist();
        self.get(id)
    }

    // Write failures degrade silently: the next reload may lose the change,
    // but the current session keeps working from memory.
    fn persist(&self) {
        let raw = match serde_json::to_string(&self.tracks) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize track registry: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(TRACKS_KEY, &raw) {
            warn!("Failed to persist track registry: {}", e);
        }
    }
}
