//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new().nest("/rooms", room_routes(state))
}

/// Room, membership and message routes (protected)
fn room_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::room::list_rooms).post(handlers::room::create_room),
        )
        .route(
            "/{room_id}",
            get(handlers::room::get_room)
                .patch(handlers::room::update_room)
                .delete(handlers::room::delete_room),
        )
        .route(
            "/{room_id}/members",
            get(handlers::member::list_members).post(handlers::member::add_members),
        )
        .route("/{room_id}/members/remove", post(handlers::member::remove_members))
        .route("/{room_id}/members/@me", delete(handlers::member::leave_room))
        .route(
            "/{room_id}/messages",
            get(handlers::message::list_messages)
                .post(handlers::message::post_message)
                .patch(handlers::message::edit_messages)
                .delete(handlers::message::delete_messages),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
