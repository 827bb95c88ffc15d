//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{BloomStage, SessionPhase, TimerResult, TimerSnapshot},
    utils::{format_clock, GrowthVisual},
};

/// Session view rendered by the timer screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub task_label: String,
    pub parent_label: String,
    pub total_minutes: i64,
    pub remaining_seconds: u64,
    pub clock: String,
    pub accurate_focus_seconds: u64,
    pub progress: f64,
    pub visual: GrowthVisual,
    pub bloom_stage: BloomStage,
    pub status: String,
    pub phase: SessionPhase,
    pub timestamp: DateTime<Utc>,
}

impl From<TimerSnapshot> for SessionResponse {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            clock: format_clock(snapshot.remaining_seconds),
            visual: GrowthVisual::from_progress(snapshot.progress),
            status: snapshot.bloom_stage.status_line().to_string(),
            task_label: snapshot.task_label,
            parent_label: snapshot.parent_label,
            total_minutes: snapshot.total_minutes,
            remaining_seconds: snapshot.remaining_seconds,
            accurate_focus_seconds: snapshot.accurate_focus_seconds,
            progress: snapshot.progress,
            bloom_stage: snapshot.bloom_stage,
            phase: snapshot.phase,
            timestamp: Utc::now(),
        }
    }
}

/// Focus summary shown once the session has ended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultResponse {
    #[serde(flatten)]
    pub result: TimerResult,
    pub accurate_focus_clock: String,
    pub summary: String,
}

impl From<TimerResult> for ResultResponse {
    fn from(result: TimerResult) -> Self {
        Self {
            accurate_focus_clock: format_clock(result.accurate_focus_seconds),
            summary: format!(
                "{} - {}: goal {} min, focused {}",
                result.parent_label,
                result.task_label,
                result.total_minutes,
                format_clock(result.accurate_focus_seconds)
            ),
            result,
        }
    }
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            error,
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}
