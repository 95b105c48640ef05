//! Learning tracks
//!
//! A `Track` is a saved language-learning configuration (target language,
//! level, accent, fluency goals) plus the persona material seeded by the
//! track-generation backend. `TrackRegistry` is the persisted, insertion-
//! ordered collection of them.

mod model;
mod registry;

pub use model::{Fluency, Level, Track, TrackForm, TrackPatch};
pub use registry::TrackRegistry;
