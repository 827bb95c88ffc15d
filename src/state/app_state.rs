//! Host application state: owns the one active focus session

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    error::SessionError,
    tasks::{spawn_ticker, TickerGuard},
};
use super::{
    focus_timer::RESULT_CHANNEL_CAPACITY, FocusTimer, TimerConfiguration, TimerResult, TimerSnapshot,
};

/// A started session together with the ticker driving it
#[derive(Debug)]
pub struct ActiveSession {
    pub timer: Arc<FocusTimer>,
    _ticker: TickerGuard,
}

/// Main application state shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// The current session, if one was ever started
    pub active: Mutex<Option<ActiveSession>>,
    /// Duration used when a start request omits one
    pub default_minutes: i64,
    pub tick_period: Duration,
    /// Results of every session started through this host
    pub result_tx: broadcast::Sender<TimerResult>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(port: u16, host: String, default_minutes: i64, tick_period: Duration) -> Self {
        let (result_tx, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);

        Self {
            active: Mutex::new(None),
            default_minutes,
            tick_period,
            result_tx,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Start a fresh session, replacing whatever was active before.
    ///
    /// An unfinished previous session is stopped manually so it still reports
    /// its result on [`AppState::subscribe_results`]; its ticker is cancelled
    /// when the old guard is dropped.
    pub fn start_session(&self, config: TimerConfiguration) -> Result<TimerSnapshot, SessionError> {
        let timer = FocusTimer::start_with_results(config, self.result_tx.clone())?;
        let ticker = spawn_ticker(Arc::clone(&timer), self.tick_period);
        let snapshot = timer.snapshot();

        let mut active = self.active.lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        let previous = active.replace(ActiveSession { timer, _ticker: ticker });
        drop(active);

        if let Some(previous) = previous {
            if !previous.timer.is_ended() {
                info!("Replacing unfinished session, stopping it first");
                if let Err(e) = previous.timer.stop_manually() {
                    warn!("Failed to stop replaced session: {}", e);
                }
            }
        }

        Ok(snapshot)
    }

    /// Subscribe to the result of every session that ends from now on
    pub fn subscribe_results(&self) -> broadcast::Receiver<TimerResult> {
        self.result_tx.subscribe()
    }

    /// Handle to the active session's timer
    pub fn current_timer(&self) -> Result<Arc<FocusTimer>, SessionError> {
        let active = self.active.lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        active
            .as_ref()
            .map(|session| Arc::clone(&session.timer))
            .ok_or(SessionError::NoSession)
    }

    /// Current snapshot of the active session
    pub fn snapshot(&self) -> Result<TimerSnapshot, SessionError> {
        Ok(self.current_timer()?.snapshot())
    }

    /// User pressed stop
    pub fn stop_session(&self) -> Result<TimerSnapshot, SessionError> {
        let timer = self.current_timer()?;
        timer.stop_manually().map_err(SessionError::Lock)?;
        Ok(timer.snapshot())
    }

    /// The host lost foreground focus
    pub fn background_session(&self) -> Result<TimerSnapshot, SessionError> {
        let timer = self.current_timer()?;
        timer.notify_backgrounded().map_err(SessionError::Lock)?;
        Ok(timer.snapshot())
    }

    /// User pressed back: leaving a running session withers it
    pub fn back_from_session(&self) -> Result<TimerSnapshot, SessionError> {
        let timer = self.current_timer()?;
        if !timer.is_ended() {
            info!("Leaving a running session, flower withers");
            timer.notify_backgrounded().map_err(SessionError::Lock)?;
        }
        Ok(timer.snapshot())
    }

    /// Final result of the active session, if it has ended
    pub fn session_result(&self) -> Result<Option<TimerResult>, SessionError> {
        Ok(self.current_timer()?.result())
    }

    /// Tear down the active session without producing a result
    pub fn shutdown(&self) -> Result<(), SessionError> {
        let mut active = self.active.lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        if active.take().is_some() {
            info!("Active focus session torn down");
        }
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BloomStage, SessionPhase};

    fn app_state() -> AppState {
        AppState::new(20554, "127.0.0.1".to_string(), 120, Duration::from_secs(1))
    }

    fn config(minutes: i64) -> TimerConfiguration {
        TimerConfiguration::new(minutes, "Reading", "Math")
    }

    #[tokio::test]
    async fn endpoints_need_a_session() {
        let state = app_state();
        assert!(matches!(state.snapshot(), Err(SessionError::NoSession)));
        assert!(matches!(state.stop_session(), Err(SessionError::NoSession)));
        assert!(matches!(state.session_result(), Err(SessionError::NoSession)));
    }

    #[tokio::test]
    async fn invalid_configuration_leaves_no_session() {
        let state = app_state();
        let err = state.start_session(config(-3)).unwrap_err();
        assert!(matches!(err, SessionError::Timer(_)));
        assert!(matches!(state.snapshot(), Err(SessionError::NoSession)));
    }

    #[tokio::test]
    async fn replacing_a_session_stops_the_old_one() {
        let state = app_state();
        state.start_session(config(5)).unwrap();
        let first = state.current_timer().unwrap();

        state.start_session(config(10)).unwrap();
        assert_eq!(first.snapshot().phase, SessionPhase::StoppedManual);
        assert_eq!(state.snapshot().unwrap().total_minutes, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_session_reports_its_result() {
        let state = app_state();
        let mut results = state.subscribe_results();

        state.start_session(config(5)).unwrap();
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        state.start_session(config(5)).unwrap();

        let result = results.try_recv().unwrap();
        assert_eq!(result.outcome, SessionPhase::StoppedManual);
        assert_eq!(result.accurate_focus_seconds, 4);
        assert!(matches!(results.try_recv(), Err(broadcast::error::TryRecvError::Empty)));
        assert!(state.session_result().unwrap().is_none());
    }

    #[tokio::test]
    async fn zero_minute_session_result_is_broadcast() {
        let state = app_state();
        let mut results = state.subscribe_results();

        state.start_session(config(0)).unwrap();
        let result = results.try_recv().unwrap();
        assert_eq!(result.bloom_stage, BloomStage::FullBloom);
        assert_eq!(result.outcome, SessionPhase::StoppedComplete);
    }

    #[tokio::test]
    async fn back_withers_running_session_only_once() {
        let state = app_state();
        state.start_session(config(5)).unwrap();

        let snapshot = state.back_from_session().unwrap();
        assert_eq!(snapshot.bloom_stage, BloomStage::Withered);
        let again = state.back_from_session().unwrap();
        assert_eq!(again, snapshot);
    }

    #[tokio::test]
    async fn shutdown_drops_session_without_result() {
        let state = app_state();
        state.start_session(config(5)).unwrap();
        let timer = state.current_timer().unwrap();

        state.shutdown().unwrap();
        assert!(timer.result().is_none());
        assert!(matches!(state.snapshot(), Err(SessionError::NoSession)));
    }

    #[test]
    fn uptime_formats_seconds() {
        assert!(app_state().get_uptime().ends_with('s'));
    }
}
