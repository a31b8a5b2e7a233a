use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    // Origins are validated at config load
    let origins: Vec<HeaderValue> = state
        .config
        .http
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        // Recordings
        .route("/api/recordings", get(handlers::list_recordings))
        .route(
            "/api/recordings",
            post(handlers::upload_recording).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/recordings/:id", get(handlers::stream_recording))
        // Health
        .route("/health", get(handlers::health))
        // Static serving of the storage root
        .nest_service("/uploads", ServeDir::new(&state.config.storage.root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
