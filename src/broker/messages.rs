use serde::{Deserialize, Serialize};

/// Body of POST /session/start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub track_id: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// Channel credentials returned by the broker. A missing `rtc_token` means
/// the channel is open and the transport joins tokenless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub channel: String,
    pub uid: u32,
    #[serde(default)]
    pub rtc_token: Option<String>,
}

/// Body of POST /session/stop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopSessionRequest {
    pub channel: String,
}

/// Body of POST /onboarding/generate-track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTrackRequest {
    pub language: String,
    pub goal: String,
}

/// Generator output seeding a new track's practice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTrack {
    pub system_prompt: String,
    #[serde(default)]
    pub initial_topics: Vec<String>,
}
