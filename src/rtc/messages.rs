use serde::{Deserialize, Serialize};

/// Microphone state announcement published on a channel's uplink subject
#[derive(Debug, Serialize, Deserialize)]
pub struct MicStateMessage {
    pub channel: String,
    pub uid: u32,
    pub live: bool,
    pub timestamp: String, // RFC3339
}
