//! Bloom Timer - a focus timer that grows a flower while you study
//!
//! A session counts down from a configured number of minutes. Staying in the
//! foreground until the end brings the flower to full bloom; leaving the app
//! early withers it. An HTTP host drives sessions and serves their results.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{SessionError, TimerError};
pub use state::{AppState, BloomStage, FocusTimer, TimerConfiguration, TimerResult, TimerSession};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
