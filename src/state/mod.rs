//! State management module
//!
//! This module contains the focus session state machine, the shared timer
//! handle around it, and the host application state.

pub mod session;
pub mod focus_timer;
pub mod app_state;

// Re-export main types
pub use session::{BloomStage, SessionPhase, TimerConfiguration, TimerResult, TimerSession};
pub use focus_timer::{FocusTimer, TimerSnapshot};
pub use app_state::{ActiveSession, AppState};
