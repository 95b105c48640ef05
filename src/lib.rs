pub mod broker;
pub mod call;
pub mod chat;
pub mod config;
pub mod http;
pub mod rtc;
pub mod storage;
pub mod track;

pub use broker::{
    GenerateTrackRequest, GeneratedTrack, HttpBroker, SessionBroker, SessionGrant,
    StartSessionRequest,
};
pub use call::{CallSession, CallState, CallStatus};
pub use chat::{Message, MessageLog, NewMessage, Sender};
pub use config::Config;
pub use http::{create_router, AppState};
pub use rtc::{MediaTransport, NatsTransport};
pub use storage::{FileStore, KvStore, MemoryStore, MESSAGES_KEY, TRACKS_KEY};
pub use track::{Fluency, Level, Track, TrackForm, TrackPatch, TrackRegistry};
