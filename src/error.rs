//! Error types for the focus timer and its host

use thiserror::Error;

/// Errors raised by the focus timer itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Negative or non-numeric duration supplied at activation
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors raised by the host service around the active session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("no focus session has been started")]
    NoSession,

    #[error("failed to lock session state: {0}")]
    Lock(String),
}
