use crate::{
    AppState, bookmark_status, create_status, delete_status, favourite_status, favourited_by,
    get_status, health, home_timeline, public_timeline, stream_user, unbookmark_status,
    unfavourite_status,
};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Statuses
        .route("/api/v1/statuses", post(create_status))
        .route(
            "/api/v1/statuses/{id}",
            get(get_status).delete(delete_status),
        )
        .route("/api/v1/statuses/{id}/favourite", post(favourite_status))
        .route("/api/v1/statuses/{id}/unfavourite", post(unfavourite_status))
        .route("/api/v1/statuses/{id}/bookmark", post(bookmark_status))
        .route("/api/v1/statuses/{id}/unbookmark", post(unbookmark_status))
        .route("/api/v1/statuses/{id}/favourited_by", get(favourited_by))
        // Timelines
        .route("/api/v1/timelines/public", get(public_timeline))
        .route("/api/v1/timelines/home", get(home_timeline))
        // Streaming
        .route("/api/v1/streaming/user", get(stream_user))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
