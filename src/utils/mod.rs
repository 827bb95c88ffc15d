//! Utility functions module
//!
//! Shutdown signal handling and presentation helpers.

pub mod display;
pub mod signals;

// Re-export main functions
pub use display::{format_clock, GrowthVisual};
pub use signals::shutdown_signal;
