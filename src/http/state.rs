use std::sync::Arc;
use tokio::sync::Mutex;

use crate::broker::SessionBroker;
use crate::call::CallSession;
use crate::chat::MessageLog;
use crate::track::TrackRegistry;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub tracks: Arc<Mutex<TrackRegistry>>,
    pub messages: Arc<Mutex<MessageLog>>,

    /// Selected-track pointer for the chat view; cleared when the selected
    /// track is removed
    pub selected_track: Arc<Mutex<Option<String>>>,

    pub call: Arc<CallSession>,
    pub broker: Arc<dyn SessionBroker>,
}

impl AppState {
    pub fn new(
        tracks: Arc<Mutex<TrackRegistry>>,
        messages: Arc<Mutex<MessageLog>>,
        call: Arc<CallSession>,
        broker: Arc<dyn SessionBroker>,
    ) -> Self {
        Self {
            tracks,
            messages,
            selected_track: Arc::new(Mutex::new(None)),
            call,
            broker,
        }
    }
}
