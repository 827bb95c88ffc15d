//! HTTP API module
//!
//! The timer screen's host surface: start a session, feed it user and
//! lifecycle events, and read back its state and result.

pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/session", post(start_handler).get(session_handler))
        .route("/session/stop", post(stop_handler))
        .route("/session/background", post(background_handler))
        .route("/session/back", post(back_handler))
        .route("/session/result", get(result_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
