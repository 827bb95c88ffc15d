//! Focus session state machine
//!
//! A session counts down from its configured duration one tick at a time and
//! ends in exactly one of three terminal phases: the countdown completed, the
//! user stopped it, or the app lost foreground and the flower withered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TimerError;

/// Outcome classification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BloomStage {
    Growing,
    FullBloom,
    Withered,
}

impl BloomStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloomStage::Growing => "GROWING",
            BloomStage::FullBloom => "FULL_BLOOM",
            BloomStage::Withered => "WITHERED",
        }
    }

    /// Status line displayed under the flower
    pub fn status_line(&self) -> &'static str {
        match self {
            BloomStage::Growing => "Growing...",
            BloomStage::FullBloom => "Full bloom!",
            BloomStage::Withered => "Withered",
        }
    }
}

impl std::fmt::Display for BloomStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Running,
    StoppedComplete,
    StoppedManual,
    StoppedWithered,
}

impl SessionPhase {
    /// Every phase except `Running` is terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionPhase::Running)
    }
}

/// Activation parameters supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfiguration {
    pub total_minutes: i64,
    pub task_label: String,
    pub parent_label: String,
}

impl TimerConfiguration {
    pub fn new(total_minutes: i64, task_label: impl Into<String>, parent_label: impl Into<String>) -> Self {
        Self {
            total_minutes,
            task_label: task_label.into(),
            parent_label: parent_label.into(),
        }
    }
}

/// Summary handed back to the host when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerResult {
    pub parent_label: String,
    pub task_label: String,
    pub total_minutes: i64,
    pub accurate_focus_seconds: u64,
    pub bloom_stage: BloomStage,
    pub outcome: SessionPhase,
    pub ended_at: DateTime<Utc>,
}

/// One run of the focus timer from activation to termination
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSession {
    config: TimerConfiguration,
    total_seconds: u64,
    remaining_seconds: u64,
    accurate_focus_seconds: u64,
    bloom_stage: BloomStage,
    phase: SessionPhase,
    result: Option<TimerResult>,
}

impl TimerSession {
    /// Activate a fresh session. A zero-minute session is complete on arrival.
    pub fn start(config: TimerConfiguration) -> Result<Self, TimerError> {
        if config.total_minutes < 0 {
            return Err(TimerError::InvalidConfiguration(format!(
                "duration must not be negative, got {} minutes",
                config.total_minutes
            )));
        }

        let total_seconds = (config.total_minutes as u64)
            .checked_mul(60)
            .ok_or_else(|| {
                TimerError::InvalidConfiguration(format!(
                    "duration of {} minutes is too large",
                    config.total_minutes
                ))
            })?;

        let mut session = Self {
            config,
            total_seconds,
            remaining_seconds: total_seconds,
            accurate_focus_seconds: 0,
            bloom_stage: BloomStage::Growing,
            phase: SessionPhase::Running,
            result: None,
        };

        if total_seconds == 0 {
            debug!("Zero-length session, completing immediately");
            session.bloom_stage = BloomStage::FullBloom;
            session.finish(SessionPhase::StoppedComplete);
        }

        Ok(session)
    }

    /// Advance the countdown by one second. Returns the result on completion.
    pub fn tick(&mut self) -> Option<TimerResult> {
        if self.phase.is_terminal() || self.remaining_seconds == 0 {
            return None;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.bloom_stage = BloomStage::FullBloom;
            self.accurate_focus_seconds = self.total_seconds;
            Some(self.finish(SessionPhase::StoppedComplete))
        } else {
            self.accurate_focus_seconds += 1;
            None
        }
    }

    /// End the session at the user's request, keeping the current bloom stage
    pub fn stop_manually(&mut self) -> Option<TimerResult> {
        if self.phase.is_terminal() {
            return None;
        }
        Some(self.finish(SessionPhase::StoppedManual))
    }

    /// End the session because the app lost foreground; the flower withers
    pub fn notify_backgrounded(&mut self) -> Option<TimerResult> {
        if self.phase.is_terminal() {
            return None;
        }
        self.bloom_stage = BloomStage::Withered;
        Some(self.finish(SessionPhase::StoppedWithered))
    }

    fn finish(&mut self, phase: SessionPhase) -> TimerResult {
        self.phase = phase;
        let result = TimerResult {
            parent_label: self.config.parent_label.clone(),
            task_label: self.config.task_label.clone(),
            total_minutes: self.config.total_minutes,
            accurate_focus_seconds: self.accurate_focus_seconds,
            bloom_stage: self.bloom_stage,
            outcome: phase,
            ended_at: Utc::now(),
        };
        self.result = Some(result.clone());
        result
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`
    pub fn progress_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        1.0 - self.remaining_seconds as f64 / self.total_seconds as f64
    }

    pub fn config(&self) -> &TimerConfiguration {
        &self.config
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn accurate_focus_seconds(&self) -> u64 {
        self.accurate_focus_seconds
    }

    pub fn bloom_stage(&self) -> BloomStage {
        self.bloom_stage
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The result, once the session has ended
    pub fn result(&self) -> Option<&TimerResult> {
        self.result.as_ref()
    }
}
