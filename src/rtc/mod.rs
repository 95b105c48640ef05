//! Real-time media transport collaborator
//!
//! The orchestrator only depends on the `MediaTransport` trait: join a
//! channel, publish the local microphone, receive raw data-channel payloads,
//! leave. `NatsTransport` adapts the contract onto NATS subjects for
//! deployments where a gateway bridges NATS and the RTC vendor; tests use a
//! scripted mock.

mod messages;
mod nats;

pub use messages::MicStateMessage;
pub use nats::NatsTransport;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Join the channel as `uid`. `token` is absent for open channels.
    async fn join(&self, channel: &str, uid: u32, token: Option<&str>) -> Result<()>;

    /// Request local microphone capture and publish it to the channel.
    async fn publish_microphone(&self) -> Result<()>;

    /// Raw inbound data-channel payloads for the joined channel. Callers
    /// decode the bytes as UTF-8 transcript text.
    async fn incoming(&self) -> Result<mpsc::Receiver<Vec<u8>>>;

    /// Leave the channel and release local capture. Best-effort.
    async fn leave(&self) -> Result<()>;
}
