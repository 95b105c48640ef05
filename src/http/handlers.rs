use super::state::AppState;
use crate::broker::GenerateTrackRequest;
use crate::chat::{Message, NewMessage};
use crate::track::{Track, TrackForm, TrackPatch};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    /// Filter to one track; absent returns every message
    pub track_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartCallRequest {
    /// Track to practice with; falls back to the selected track
    pub track_id: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Track Handlers
// ============================================================================

/// GET /tracks
pub async fn list_tracks(State(state): State<AppState>) -> impl IntoResponse {
    let tracks = state.tracks.lock().await;
    Json(tracks.list().to_vec())
}

/// POST /tracks
/// Validate the form, generate the persona, then append the track.
pub async fn create_track(
    State(state): State<AppState>,
    Json(form): Json<TrackForm>,
) -> impl IntoResponse {
    if let Err(e) = form.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response();
    }

    let req = GenerateTrackRequest {
        language: form.language.clone(),
        goal: form.goal(),
    };

    let generated = match state.broker.generate_track(&req).await {
        Ok(generated) => generated,
        Err(e) => {
            error!("Failed to generate track: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Failed to create track: {e}"),
                }),
            )
                .into_response();
        }
    };

    let track = form.into_track(uuid::Uuid::new_v4().to_string(), generated);
    info!("Created track {} ({})", track.id, track.language);

    let mut tracks = state.tracks.lock().await;
    tracks.add(track.clone());

    (StatusCode::OK, Json(track)).into_response()
}

/// PATCH /tracks/:id
pub async fn update_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TrackPatch>,
) -> impl IntoResponse {
    let mut tracks = state.tracks.lock().await;

    match tracks.update(&id, patch) {
        Some(track) => (StatusCode::OK, Json(track.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Track {id} not found"),
            }),
        )
            .into_response(),
    }
}

/// DELETE /tracks/:id
/// Removal clears the selection pointer when it matches; the track's
/// messages are retained.
pub async fn delete_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    {
        let mut tracks = state.tracks.lock().await;
        tracks.remove(&id);
    }

    let mut selected = state.selected_track.lock().await;
    if selected.as_deref() == Some(id.as_str()) {
        *selected = None;
    }

    Json(StatusResponse {
        status: "removed".to_string(),
    })
}

/// POST /tracks/:id/select
pub async fn select_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let tracks = state.tracks.lock().await;
    if tracks.get(&id).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Track {id} not found"),
            }),
        )
            .into_response();
    }

    let mut selected = state.selected_track.lock().await;
    *selected = Some(id);

    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "selected".to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Message Handlers
// ============================================================================

/// GET /messages?trackId=...
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> impl IntoResponse {
    let messages = state.messages.lock().await;
    let listed: Vec<Message> = messages
        .iter_for(query.track_id.as_deref())
        .cloned()
        .collect();
    Json(listed)
}

/// POST /messages
/// Local echo: the client appends its own line (and, for the simulated
/// reply path, an assistant line) directly.
pub async fn append_message(
    State(state): State<AppState>,
    Json(new): Json<NewMessage>,
) -> impl IntoResponse {
    let mut messages = state.messages.lock().await;
    let stored = messages.append(new);
    Json(stored)
}

/// DELETE /messages
pub async fn clear_messages(State(state): State<AppState>) -> impl IntoResponse {
    let mut messages = state.messages.lock().await;
    messages.clear();
    Json(StatusResponse {
        status: "cleared".to_string(),
    })
}

/// DELETE /tracks/:id/messages
pub async fn clear_track_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut messages = state.messages.lock().await;
    messages.clear_for_track(&id);
    Json(StatusResponse {
        status: "cleared".to_string(),
    })
}

// ============================================================================
// Call Handlers
// ============================================================================

/// POST /call/start
/// Activating without a resolvable track is a deliberate no-op, not an error.
pub async fn start_call(
    State(state): State<AppState>,
    req: Option<Json<StartCallRequest>>,
) -> impl IntoResponse {
    let req = req.map(|Json(r)| r).unwrap_or_default();

    let track_id = match req.track_id {
        Some(id) => Some(id),
        None => state.selected_track.lock().await.clone(),
    };

    let track: Option<Track> = match track_id {
        Some(id) => {
            let tracks = state.tracks.lock().await;
            tracks.get(&id).cloned()
        }
        None => None,
    };

    match state.call.activate(track.as_ref()).await {
        Ok(true) => (
            StatusCode::OK,
            Json(CallResponse {
                status: "active".to_string(),
                message: "Listening".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::OK,
            Json(CallResponse {
                status: "idle".to_string(),
                message: "No track selected".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to start call: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Failed to start call: {e}"),
                }),
            )
                .into_response()
        }
    }
}

/// POST /call/stop
pub async fn stop_call(State(state): State<AppState>) -> impl IntoResponse {
    state.call.deactivate().await;
    Json(StatusResponse {
        status: "idle".to_string(),
    })
}

/// GET /call/status
pub async fn call_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.call.status().await)
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
