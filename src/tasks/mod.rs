//! Background tasks module
//!
//! This module contains the tick driver that runs alongside a focus session.

pub mod ticker;

// Re-export main items
pub use ticker::{spawn_ticker, TickerGuard};
