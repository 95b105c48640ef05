//! Live-call session lifecycle
//!
//! Binds a selected track to a real-time channel: the broker issues the
//! channel credentials, the transport joins and publishes the microphone,
//! and inbound data-channel payloads become assistant messages in the log.

mod session;

pub use session::{CallSession, CallState, CallStatus};
