use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::broker::{SessionBroker, StartSessionRequest};
use crate::chat::{MessageLog, NewMessage};
use crate::rtc::MediaTransport;
use crate::track::Track;

/// Listening state machine. `Starting` and `Stopping` exist only while a
/// collaborator call is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallState {
    Idle,
    Starting,
    Active,
    Stopping,
}

/// Snapshot for status queries
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStatus {
    pub state: CallState,
    pub channel: Option<String>,
    pub track_id: Option<String>,
}

struct LiveCall {
    channel: String,
    track_id: String,
    transcript_task: JoinHandle<()>,
}

struct Inner {
    state: CallState,
    live: Option<LiveCall>,
}

/// Orchestrates one live session at a time per instance.
///
/// The inner lock is held across the whole activation, so concurrent
/// `activate`/`deactivate` calls serialize: a second activation while not
/// `Idle` is rejected, and a deactivation racing a start observes `Active`.
pub struct CallSession {
    broker: Arc<dyn SessionBroker>,
    transport: Arc<dyn MediaTransport>,
    log: Arc<Mutex<MessageLog>>,
    inner: Mutex<Inner>,
}

impl CallSession {
    pub fn new(
        broker: Arc<dyn SessionBroker>,
        transport: Arc<dyn MediaTransport>,
        log: Arc<Mutex<MessageLog>>,
    ) -> Self {
        Self {
            broker,
            transport,
            log,
            inner: Mutex::new(Inner {
                state: CallState::Idle,
                live: None,
            }),
        }
    }

    /// Start listening on behalf of `track`.
    ///
    /// With no track selected this is a deliberate no-op: the state stays
    /// `Idle` and no collaborator is called. Returns whether the session
    /// reached `Active`. Any failure mid-setup rolls back to `Idle` with no
    /// partial session and the error is returned for the caller to log.
    pub async fn activate(&self, track: Option<&Track>) -> Result<bool> {
        let Some(track) = track else {
            debug!("Mic activated without a selected track, ignoring");
            return Ok(false);
        };

        let mut inner = self.inner.lock().await;
        if inner.state != CallState::Idle {
            warn!(
                "Rejecting activation for track {}: session is {:?}",
                track.id, inner.state
            );
            return Ok(false);
        }
        inner.state = CallState::Starting;

        match self.start_live(track).await {
            Ok(live) => {
                info!(
                    "Session active on channel {} for track {}",
                    live.channel, track.id
                );
                inner.live = Some(live);
                inner.state = CallState::Active;
                Ok(true)
            }
            Err(e) => {
                inner.state = CallState::Idle;
                Err(e)
            }
        }
    }

    async fn start_live(&self, track: &Track) -> Result<LiveCall> {
        let req = StartSessionRequest {
            track_id: track.id.clone(),
            language: track.language.clone(),
            voice: None,
        };
        let grant = self
            .broker
            .start_session(&req)
            .await
            .context("Broker refused to start a session")?;

        if let Err(e) = self
            .transport
            .join(&grant.channel, grant.uid, grant.rtc_token.as_deref())
            .await
        {
            self.release_channel(&grant.channel).await;
            return Err(e).context("Failed to join channel");
        }

        if let Err(e) = self.transport.publish_microphone().await {
            self.abandon(&grant.channel).await;
            return Err(e).context("Failed to publish microphone");
        }

        let rx = match self.transport.incoming().await {
            Ok(rx) => rx,
            Err(e) => {
                self.abandon(&grant.channel).await;
                return Err(e).context("Failed to subscribe to data channel");
            }
        };

        let transcript_task = self.spawn_transcript_task(rx, track.id.clone());

        Ok(LiveCall {
            channel: grant.channel,
            track_id: track.id.clone(),
            transcript_task,
        })
    }

    /// Stop listening and tear the session down. Every step is best-effort;
    /// the state always returns to `Idle`.
    pub async fn deactivate(&self) {
        let mut inner = self.inner.lock().await;
        let Some(live) = inner.live.take() else {
            debug!("Deactivate with no active session, ignoring");
            inner.state = CallState::Idle;
            return;
        };
        inner.state = CallState::Stopping;

        live.transcript_task.abort();
        self.abandon(&live.channel).await;

        info!("Session on channel {} stopped", live.channel);
        inner.state = CallState::Idle;
    }

    pub async fn status(&self) -> CallStatus {
        let inner = self.inner.lock().await;
        CallStatus {
            state: inner.state,
            channel: inner.live.as_ref().map(|l| l.channel.clone()),
            track_id: inner.live.as_ref().map(|l| l.track_id.clone()),
        }
    }

    fn spawn_transcript_task(
        &self,
        mut rx: tokio::sync::mpsc::Receiver<Vec<u8>>,
        track_id: String,
    ) -> JoinHandle<()> {
        let log = Arc::clone(&self.log);

        tokio::spawn(async move {
            debug!("Transcript task started for track {}", track_id);

            while let Some(payload) = rx.recv().await {
                let text = match String::from_utf8(payload) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Skipping non-UTF-8 data-channel payload: {}", e);
                        continue;
                    }
                };

                let mut log = log.lock().await;
                log.append(NewMessage::assistant(text, Some(track_id.clone())));
            }

            debug!("Transcript task stopped for track {}", track_id);
        })
    }

    async fn release_channel(&self, channel: &str) {
        if let Err(e) = self.broker.stop_session(channel).await {
            error!("Failed to release channel {}: {}", channel, e);
        }
    }

    async fn abandon(&self, channel: &str) {
        if let Err(e) = self.transport.leave().await {
            error!("Failed to leave channel {}: {}", channel, e);
        }
        self.release_channel(channel).await;
    }
}
