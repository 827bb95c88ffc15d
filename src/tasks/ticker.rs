//! Focus timer tick driver

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::state::FocusTimer;

/// Owns the running tick task. Dropping the guard cancels the task.
#[derive(Debug)]
pub struct TickerGuard {
    handle: JoinHandle<()>,
}

impl TickerGuard {
    /// Whether the tick task has exited on its own
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the tick task for a freshly started session
pub fn spawn_ticker(timer: Arc<FocusTimer>, period: Duration) -> TickerGuard {
    let handle = tokio::spawn(ticker_task(timer, period));
    TickerGuard { handle }
}

/// Tick once per period until the session ends by any path
async fn ticker_task(timer: Arc<FocusTimer>, period: Duration) {
    let mut snapshots = timer.subscribe();
    if snapshots.borrow_and_update().phase.is_terminal() {
        debug!("Session already ended, ticker not started");
        return;
    }

    info!("Starting focus ticker every {:?}", period);
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match timer.tick() {
                    Ok(Some(result)) => {
                        info!("Countdown finished, {}s of focus", result.accurate_focus_seconds);
                        break;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        error!("Failed to tick focus session: {}", e);
                        break;
                    }
                }
            }

            // Stop or background ended the session between ticks
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                if snapshots.borrow_and_update().phase.is_terminal() {
                    debug!("Session ended, ticker stopping");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BloomStage, SessionPhase, TimerConfiguration};

    const SECOND: Duration = Duration::from_secs(1);

    fn timer(minutes: i64) -> Arc<FocusTimer> {
        FocusTimer::start(TimerConfiguration::new(minutes, "Reading", "Math")).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn runs_countdown_to_full_bloom() {
        let timer = timer(2);
        let guard = spawn_ticker(Arc::clone(&timer), SECOND);

        let result = timer.wait_for_result().await.unwrap();
        assert_eq!(result.bloom_stage, BloomStage::FullBloom);
        assert_eq!(result.accurate_focus_seconds, 120);
        assert_eq!(timer.snapshot().remaining_seconds, 0);

        tokio::task::yield_now().await;
        assert!(guard.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn background_after_ten_seconds_withers() {
        let timer = timer(5);
        let _guard = spawn_ticker(Arc::clone(&timer), SECOND);

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        let result = timer.notify_backgrounded().unwrap().unwrap();
        assert_eq!(result.accurate_focus_seconds, 10);
        assert_eq!(result.bloom_stage, BloomStage::Withered);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.snapshot().accurate_focus_seconds, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_stop_ends_ticker() {
        let timer = timer(5);
        let guard = spawn_ticker(Arc::clone(&timer), SECOND);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        timer.stop_manually().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(guard.is_finished());
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::StoppedManual);
        assert_eq!(snapshot.accurate_focus_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_guard_cancels_ticks() {
        let timer = timer(5);
        let guard = spawn_ticker(Arc::clone(&timer), SECOND);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        drop(guard);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let snapshot = timer.snapshot();
        assert_eq!(snapshot.remaining_seconds, 298);
        assert_eq!(snapshot.phase, SessionPhase::Running);
    }

    #[tokio::test]
    async fn zero_minute_session_never_ticks() {
        let timer = timer(0);
        let guard = spawn_ticker(Arc::clone(&timer), SECOND);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(guard.is_finished());
    }
}
