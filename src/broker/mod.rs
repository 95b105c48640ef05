//! Session broker collaborator
//!
//! The remote backend that issues real-time channel credentials and
//! generates track personas. Consumed through the `SessionBroker` trait so
//! the orchestrator can be exercised against a recording mock.

mod client;
mod messages;

pub use client::HttpBroker;
pub use messages::{GenerateTrackRequest, GeneratedTrack, SessionGrant, StartSessionRequest};

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SessionBroker: Send + Sync {
    /// Ask the backend to provision a real-time channel for a track.
    async fn start_session(&self, req: &StartSessionRequest) -> Result<SessionGrant>;

    /// Notify the backend that the channel can be released. Best-effort on
    /// the caller's side.
    async fn stop_session(&self, channel: &str) -> Result<()>;

    /// Generate persona material for a new track.
    async fn generate_track(&self, req: &GenerateTrackRequest) -> Result<GeneratedTrack>;
}
