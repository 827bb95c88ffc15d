//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{error::SessionError, state::AppState};
use super::{
    requests::StartSessionRequest,
    responses::{ErrorResponse, HealthResponse, ResultResponse, SessionResponse},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: SessionError) -> ApiError {
    let status = match &e {
        SessionError::Timer(_) => {
            warn!("Rejected session configuration: {}", e);
            StatusCode::BAD_REQUEST
        }
        SessionError::NoSession => StatusCode::NOT_FOUND,
        SessionError::Lock(_) => {
            error!("Session state unavailable: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

/// Handle POST /session - Start a new focus session
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let config = request
        .into_configuration(state.default_minutes)
        .map_err(|e| error_response(e.into()))?;

    let snapshot = state.start_session(config).map_err(error_response)?;
    info!("Session endpoint called - focus session started");
    Ok(Json(snapshot.into()))
}

/// Handle GET /session - Return the current session view
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.snapshot().map_err(error_response)?;
    Ok(Json(snapshot.into()))
}

/// Handle POST /session/stop - Stop the session early
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.stop_session().map_err(error_response)?;
    info!("Stop endpoint called - phase is now {:?}", snapshot.phase);
    Ok(Json(snapshot.into()))
}

/// Handle POST /session/background - The app lost foreground focus
pub async fn background_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.background_session().map_err(error_response)?;
    info!("Background endpoint called - phase is now {:?}", snapshot.phase);
    Ok(Json(snapshot.into()))
}

/// Handle POST /session/back - Leave the timer screen
pub async fn back_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.back_from_session().map_err(error_response)?;
    Ok(Json(snapshot.into()))
}

/// Handle GET /session/result - Return the focus summary once ended
pub async fn result_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResultResponse>, ApiError> {
    match state.session_result().map_err(error_response)? {
        Some(result) => Ok(Json(result.into())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("focus session is still running".to_string())),
        )),
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
