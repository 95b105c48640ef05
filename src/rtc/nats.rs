use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::{mpsc, Mutex};
use tracing::info;

use super::messages::MicStateMessage;
use super::MediaTransport;

struct Joined {
    client: async_nats::Client,
    channel: String,
    uid: u32,
}

/// NATS-backed media transport adapter.
///
/// Subject layout per channel:
/// - `rtc.{app_id}.{channel}.uplink`    — microphone state announcements
/// - `rtc.{app_id}.{channel}.messages`  — inbound data-channel payloads,
///   forwarded verbatim as raw bytes
pub struct NatsTransport {
    url: String,
    app_id: String,
    joined: Mutex<Option<Joined>>,
}

impl NatsTransport {
    pub fn new(url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            app_id: app_id.into(),
            joined: Mutex::new(None),
        }
    }

    fn subject(&self, channel: &str, leaf: &str) -> String {
        format!("rtc.{}.{}.{}", self.app_id, channel, leaf)
    }

    async fn announce_mic(&self, joined: &Joined, live: bool) -> Result<()> {
        let message = MicStateMessage {
            channel: joined.channel.clone(),
            uid: joined.uid,
            live,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let payload = serde_json::to_vec(&message)?;

        joined
            .client
            .publish(self.subject(&joined.channel, "uplink"), payload.into())
            .await
            .context("Failed to publish microphone state")?;

        Ok(())
    }
}

#[async_trait]
impl MediaTransport for NatsTransport {
    async fn join(&self, channel: &str, uid: u32, token: Option<&str>) -> Result<()> {
        let mut joined = self.joined.lock().await;
        if joined.is_some() {
            bail!("Already joined a channel");
        }

        info!(
            "Joining channel {} as uid {} ({})",
            channel,
            uid,
            if token.is_some() { "token" } else { "open" }
        );

        // Token validation happens at the gateway; the adapter only needs
        // the connection.
        let client = async_nats::connect(&self.url)
            .await
            .context("Failed to connect to transport fabric")?;

        *joined = Some(Joined {
            client,
            channel: channel.to_string(),
            uid,
        });

        Ok(())
    }

    async fn publish_microphone(&self) -> Result<()> {
        let joined = self.joined.lock().await;
        let joined = joined.as_ref().context("Not joined to a channel")?;
        self.announce_mic(joined, true).await
    }

    async fn incoming(&self) -> Result<mpsc::Receiver<Vec<u8>>> {
        let joined = self.joined.lock().await;
        let joined = joined.as_ref().context("Not joined to a channel")?;

        let subject = self.subject(&joined.channel, "messages");
        info!("Subscribing to data-channel messages on {}", subject);

        let mut subscriber = joined
            .client
            .subscribe(subject)
            .await
            .context("Failed to subscribe to data-channel messages")?;

        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(async move {
            while let Some(msg) = subscriber.next().await {
                if tx.send(msg.payload.to_vec()).await.is_err() {
                    break; // consumer gone
                }
            }
        });

        Ok(rx)
    }

    async fn leave(&self) -> Result<()> {
        let mut joined = self.joined.lock().await;
        let Some(joined) = joined.take() else {
            return Ok(());
        };

        info!("Leaving channel {}", joined.channel);
        self.announce_mic(&joined, false).await?;

        // async-nats flushes and cleans up on drop
        Ok(())
    }
}
