use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Track registry
        .route(
            "/tracks",
            get(handlers::list_tracks).post(handlers::create_track),
        )
        .route(
            "/tracks/:id",
            patch(handlers::update_track).delete(handlers::delete_track),
        )
        .route("/tracks/:id/select", post(handlers::select_track))
        .route(
            "/tracks/:id/messages",
            delete(handlers::clear_track_messages),
        )
        // Message log
        .route(
            "/messages",
            get(handlers::list_messages)
                .post(handlers::append_message)
                .delete(handlers::clear_messages),
        )
        // Live call control
        .route("/call/start", post(handlers::start_call))
        .route("/call/stop", post(handlers::stop_call))
        .route("/call/status", get(handlers::call_status))
        // The browser client runs on another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
