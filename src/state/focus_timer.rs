//! Shared focus timer handle
//!
//! Wraps a [`TimerSession`] behind a mutex so ticks and lifecycle events are
//! serialized, and publishes a [`TimerSnapshot`] after every mutation for
//! whoever is presenting the session. The final [`TimerResult`] is also sent
//! once on a broadcast channel when the session ends.

use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::error::TimerError;
use super::session::{
    BloomStage, SessionPhase, TimerConfiguration, TimerResult, TimerSession,
};

/// Point-in-time view of a session for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub task_label: String,
    pub parent_label: String,
    pub total_minutes: i64,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub accurate_focus_seconds: u64,
    pub progress: f64,
    pub bloom_stage: BloomStage,
    pub phase: SessionPhase,
    pub result: Option<TimerResult>,
}

impl From<&TimerSession> for TimerSnapshot {
    fn from(session: &TimerSession) -> Self {
        let config = session.config();
        Self {
            task_label: config.task_label.clone(),
            parent_label: config.parent_label.clone(),
            total_minutes: config.total_minutes,
            total_seconds: session.total_seconds(),
            remaining_seconds: session.remaining_seconds(),
            accurate_focus_seconds: session.accurate_focus_seconds(),
            progress: session.progress_fraction(),
            bloom_stage: session.bloom_stage(),
            phase: session.phase(),
            result: session.result().cloned(),
        }
    }
}

/// Focus timer shared between the tick driver and the host
#[derive(Debug)]
pub struct FocusTimer {
    session: Mutex<TimerSession>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
    result_tx: broadcast::Sender<TimerResult>,
}

/// Capacity of a result channel created for a standalone timer
pub const RESULT_CHANNEL_CAPACITY: usize = 16;

fn publish_result(result_tx: &broadcast::Sender<TimerResult>, result: TimerResult) {
    if let Err(e) = result_tx.send(result) {
        debug!("No result listeners: {}", e);
    }
}

impl FocusTimer {
    /// Activate a new session with its own result channel
    pub fn start(config: TimerConfiguration) -> Result<Arc<Self>, TimerError> {
        let (result_tx, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
        Self::start_with_results(config, result_tx)
    }

    /// Activate a new session that reports its result on a shared channel
    pub fn start_with_results(
        config: TimerConfiguration,
        result_tx: broadcast::Sender<TimerResult>,
    ) -> Result<Arc<Self>, TimerError> {
        let session = TimerSession::start(config)?;
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::from(&session));

        info!(
            "Focus session started: {} / {} for {} minutes",
            session.config().parent_label,
            session.config().task_label,
            session.config().total_minutes
        );
        if let Some(result) = session.result() {
            info!("Session ended immediately with {:?}", result.outcome);
            publish_result(&result_tx, result.clone());
        }

        Ok(Arc::new(Self {
            session: Mutex::new(session),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            result_tx,
        }))
    }

    /// Apply one mutation under the lock and publish the new snapshot
    fn apply<F>(&self, event: &str, mutate: F) -> Result<Option<TimerResult>, String>
    where
        F: FnOnce(&mut TimerSession) -> Option<TimerResult>,
    {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock timer session: {}", e))?;

        if session.is_ended() {
            debug!("Ignoring {} on a finished session", event);
            return Ok(None);
        }

        let result = mutate(&mut *session);

        // Publish under the lock so snapshots reach observers in mutation order
        if let Err(e) = self.snapshot_tx.send(TimerSnapshot::from(&*session)) {
            warn!("Failed to publish timer snapshot: {}", e);
        }
        if let Some(result) = &result {
            publish_result(&self.result_tx, result.clone());
        }
        drop(session);

        if let Some(result) = &result {
            info!(
                "Focus session ended by {}: {:?}, {}s focused, {}",
                event, result.outcome, result.accurate_focus_seconds, result.bloom_stage
            );
        }

        Ok(result)
    }

    /// Advance the countdown by one second
    pub fn tick(&self) -> Result<Option<TimerResult>, String> {
        self.apply("tick", TimerSession::tick)
    }

    /// User-initiated early stop
    pub fn stop_manually(&self) -> Result<Option<TimerResult>, String> {
        self.apply("manual stop", TimerSession::stop_manually)
    }

    /// The host lost foreground focus
    pub fn notify_backgrounded(&self) -> Result<Option<TimerResult>, String> {
        self.apply("backgrounding", TimerSession::notify_backgrounded)
    }

    /// Current snapshot of the session
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshots published after every change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to the final result. Subscribe before the session can end.
    pub fn subscribe_results(&self) -> broadcast::Receiver<TimerResult> {
        self.result_tx.subscribe()
    }

    pub fn is_ended(&self) -> bool {
        self.snapshot_tx.borrow().phase.is_terminal()
    }

    /// The final result, if the session has ended
    pub fn result(&self) -> Option<TimerResult> {
        self.snapshot_tx.borrow().result.clone()
    }

    /// Wait until the session ends and return its result
    pub async fn wait_for_result(&self) -> Option<TimerResult> {
        let mut rx = self.subscribe();
        let snapshot = rx.wait_for(|s| s.result.is_some()).await.ok()?;
        snapshot.result.clone()
    }
}
