use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::messages::{
    GenerateTrackRequest, GeneratedTrack, SessionGrant, StartSessionRequest, StopSessionRequest,
};
use super::SessionBroker;

/// reqwest-backed broker client. Any non-2xx response is an error carrying
/// the status and body text. No retries; every failure is terminal for the
/// attempt.
pub struct HttpBroker {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBroker {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach broker at {url}"))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            bail!("HTTP {status}: {text}");
        }

        res.json()
            .await
            .with_context(|| format!("Malformed broker response from {url}"))
    }
}

#[async_trait]
impl SessionBroker for HttpBroker {
    async fn start_session(&self, req: &StartSessionRequest) -> Result<SessionGrant> {
        info!("Requesting session start for track {}", req.track_id);
        self.post_json("/session/start", req).await
    }

    async fn stop_session(&self, channel: &str) -> Result<()> {
        info!("Requesting session stop for channel {}", channel);
        let req = StopSessionRequest {
            channel: channel.to_string(),
        };
        // The ack body carries nothing we use
        let _: serde_json::Value = self.post_json("/session/stop", &req).await?;
        Ok(())
    }

    async fn generate_track(&self, req: &GenerateTrackRequest) -> Result<GeneratedTrack> {
        info!("Generating track persona for {}", req.language);
        self.post_json("/onboarding/generate-track", req).await
    }
}
